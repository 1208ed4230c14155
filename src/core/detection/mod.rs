// Core detection module - contains the spam detection business logic.

pub mod content_analyzer;
pub mod detection_models;
pub mod detection_service;
pub mod samples;
pub mod scoring;

pub use detection_models::*;
pub use detection_service::*;

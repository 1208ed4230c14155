// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "detection/mod.rs"]
pub mod detection;

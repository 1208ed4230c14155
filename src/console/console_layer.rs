// Console layer - command line parsing, content ingestion and rendering.
//
// This is the collaborator that feeds the core: it turns arguments, files and
// stdin into plain strings and prints whatever the detection service returns.

#[path = "args.rs"]
pub mod args;

#[path = "input.rs"]
pub mod input;

#[path = "formatter.rs"]
pub mod formatter;

#[path = "session.rs"]
pub mod session;

// Re-export the types main needs
pub use args::Cli;
pub use input::ContentSource;

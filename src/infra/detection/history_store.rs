// Implementations for the detection history log.

pub mod in_memory;

// Re-export for convenience
pub use in_memory::InMemoryHistoryStore;

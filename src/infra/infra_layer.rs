// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "detection/history_store.rs"]
pub mod detection;

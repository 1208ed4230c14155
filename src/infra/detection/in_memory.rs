// This is the infra layer - it implements the traits defined in core.
// This file provides an IN-MEMORY implementation of HistoryStore.
//
// The log lives for the lifetime of the process and is gone on restart.
// Results are kept newest first and the oldest insertion is dropped once
// the log grows past its capacity (FIFO by insertion, not LRU).

use crate::core::detection::{DetectionResult, HistoryError, HistoryStore, HISTORY_CAPACITY};
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::RwLock;

/// In-memory, bounded implementation of HistoryStore.
///
/// **RwLock:**
/// Reads (history, statistics) can run side by side; a write only happens once
/// per completed detection. Concurrent detections are therefore safe, and the
/// log order is the order in which they finished.
pub struct InMemoryHistoryStore {
    /// Newest result at the front
    entries: RwLock<VecDeque<DetectionResult>>,
    capacity: usize,
}

impl InMemoryHistoryStore {
    /// Create an empty store holding up to `HISTORY_CAPACITY` results.
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity + 1)),
            capacity,
        }
    }
}

// Implement the trait defined in core.
#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn record(&self, result: DetectionResult) -> Result<(), HistoryError> {
        let mut entries = self.entries.write().await;

        entries.push_front(result);
        // Only ever one over, but truncate keeps the invariant obvious
        entries.truncate(self.capacity);

        Ok(())
    }

    async fn list(&self) -> Result<Vec<DetectionResult>, HistoryError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().cloned().collect())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<DetectionResult>, HistoryError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().take(limit).cloned().collect())
    }
}

// Default trait implementation for convenient initialization
impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result(content: &str) -> DetectionResult {
        DetectionResult {
            id: content.to_string(),
            timestamp: Utc::now(),
            content: content.to_string(),
            is_spam: false,
            confidence: 0.0,
            indicators: Vec::new(),
            processing_time: 0,
        }
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryHistoryStore::new();

        // Initially the log is empty
        assert!(store.list().await.unwrap().is_empty());

        store.record(result("one")).await.unwrap();
        store.record(result("two")).await.unwrap();

        // Newest first
        let list = store.list().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].content, "two");
        assert_eq!(list[1].content, "one");
    }

    #[tokio::test]
    async fn test_eviction_drops_oldest() {
        let store = InMemoryHistoryStore::new();

        for i in 0..HISTORY_CAPACITY + 5 {
            store.record(result(&i.to_string())).await.unwrap();
            assert!(store.list().await.unwrap().len() <= HISTORY_CAPACITY);
        }

        let list = store.list().await.unwrap();
        assert_eq!(list.len(), HISTORY_CAPACITY);
        assert_eq!(list[0].content, (HISTORY_CAPACITY + 4).to_string());
        assert_eq!(list[HISTORY_CAPACITY - 1].content, "5");
    }

    #[tokio::test]
    async fn test_small_capacity() {
        let store = InMemoryHistoryStore::with_capacity(2);

        store.record(result("a")).await.unwrap();
        store.record(result("b")).await.unwrap();
        store.record(result("c")).await.unwrap();

        let contents: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.content)
            .collect();
        assert_eq!(contents, vec!["c", "b"]);
    }

    #[tokio::test]
    async fn test_recent() {
        let store = InMemoryHistoryStore::default();
        for name in ["a", "b", "c"] {
            store.record(result(name)).await.unwrap();
        }

        let recent = store.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].content, "c");

        assert_eq!(store.recent(10).await.unwrap().len(), 3);
        assert!(store.recent(0).await.unwrap().is_empty());
    }
}

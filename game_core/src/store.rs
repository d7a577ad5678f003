use std::collections::HashMap;

/// Persistent integer key-value store.
///
/// Best effort on both sides: a read failure looks like an absent key and
/// a failed write is dropped.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<u32>;
    fn set(&mut self, key: &str, value: u32);
}

/// In-memory store for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: u32) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }

    /// Number of `set` calls seen so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) {
        self.writes += 1;
        self.values.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("best"), None);
        store.set("best", 120);
        assert_eq!(store.get("best"), Some(120));
        assert_eq!(store.writes(), 1);
    }
}

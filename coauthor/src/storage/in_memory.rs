use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use coauthor_core::StorageKey;

use crate::storage::Storage;

#[derive(Clone)]
pub struct InMemoryStorage(Arc<Mutex<HashMap<StorageKey, Vec<u8>>>>);

impl InMemoryStorage {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(HashMap::new())))
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for InMemoryStorage {
    fn load(&self, key: StorageKey) -> Option<Vec<u8>> {
        self.0.lock().unwrap().get(&key).cloned()
    }

    fn load_range(&self, prefix: StorageKey) -> HashMap<StorageKey, Vec<u8>> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| prefix.is_prefix_of(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn put(&self, key: StorageKey, data: Vec<u8>) {
        self.0.lock().unwrap().insert(key, data);
    }

    fn delete(&self, key: StorageKey) {
        self.0.lock().unwrap().remove(&key);
    }
}

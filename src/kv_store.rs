use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Process-wide string map behind one coarse lock.
///
/// Cloning is cheap and every clone shares the same entries, so a single
/// store built in `main` can be handed to every worker.
#[derive(Clone, Default)]
pub struct KVStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl KVStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Stores `value` under `key`, replacing whatever was there.
    pub async fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut store = self.inner.lock().await;
        store.insert(key.into(), value.into());
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let store = self.inner.lock().await;
        store.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

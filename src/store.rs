use std::collections::HashMap;

use tokio::sync::Mutex;

/// Repository seam between the screens and their data
///
/// The screens only ever fetch by id, list, and save, so a real backend can
/// replace the in-memory stand-in without touching screen logic. A missing
/// id is the screens' "not found" state, not an error.
pub trait Store<T: Clone + Send + Sync> {
    fn fetch(&self, id: &str) -> impl Future<Output = anyhow::Result<Option<T>>> + Send;
    fn list(&self) -> impl Future<Output = anyhow::Result<Vec<T>>> + Send;
    fn save(&self, id: &str, record: T) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// HashMap-backed store holding the mock dataset
pub struct MemoryStore<T> {
    records: Mutex<HashMap<String, T>>,
}

impl<T: Clone + Send + Sync> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Seed the store with keyed records
    pub fn with_records(records: impl IntoIterator<Item = (String, T)>) -> Self {
        Self {
            records: Mutex::new(records.into_iter().collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

impl<T: Clone + Send + Sync> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> Store<T> for MemoryStore<T> {
    async fn fetch(&self, id: &str) -> anyhow::Result<Option<T>> {
        Ok(self.records.lock().await.get(id).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<T>> {
        Ok(self.records.lock().await.values().cloned().collect())
    }

    async fn save(&self, id: &str, record: T) -> anyhow::Result<()> {
        self.records.lock().await.insert(id.to_string(), record);
        Ok(())
    }
}

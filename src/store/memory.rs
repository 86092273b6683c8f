use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{IndicatorStore, StoreError};

/// In-process store; rows keep their insertion order like a sheet would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<(String, f64)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows<I, K>(rows: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            rows: RwLock::new(rows.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// Copy of all rows in order.
    pub async fn rows(&self) -> Vec<(String, f64)> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl IndicatorStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<f64>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|(k, _)| k == key).map(|(_, v)| *v))
    }

    async fn set(&self, key: &str, value: f64) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|(k, _)| k == key) {
            Some(row) => row.1 = value,
            None => rows.push((key.to_string(), value)),
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

//! Key/value stores that persist indicator values between sessions.
//!
//! Every backend exposes the same two operations: read one value by key and
//! insert-or-update one value by key. Keys are the canonical snake_case
//! indicator names (see [`crate::models::IndicatorKey`]).

pub mod memory;
pub mod questdb;
pub mod sheet;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::StoreBackend;

pub use memory::MemoryStore;
pub use questdb::QuestStore;
pub use sheet::SheetStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("value '{raw}' stored under '{key}' is not a number")]
    InvalidValue { key: String, raw: String },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed sheet at line {line}: {reason}")]
    MalformedSheet { line: usize, reason: String },
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),
}

#[async_trait]
pub trait IndicatorStore: Send + Sync {
    /// Value stored under `key`, or `None` when the key has no entry.
    async fn get(&self, key: &str) -> Result<Option<f64>, StoreError>;

    /// Update the entry for `key` in place, or append one if absent.
    async fn set(&self, key: &str, value: f64) -> Result<(), StoreError>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}

/// Open the store selected by configuration.
pub async fn open_store(
    backend: &StoreBackend,
) -> Result<Arc<dyn IndicatorStore>, StoreError> {
    info!(backend = %backend, "opening indicator store");
    let store: Arc<dyn IndicatorStore> = match backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Sheet(path) => Arc::new(SheetStore::new(path.clone())),
        StoreBackend::QuestDb(url) => Arc::new(QuestStore::connect(url).await?),
    };
    Ok(store)
}

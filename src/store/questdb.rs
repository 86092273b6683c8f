//! QuestDB-backed indicator store (Postgres wire protocol).

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::Utc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_postgres::{Client, NoTls};
use tracing::{error, info, warn};

use super::{IndicatorStore, StoreError};

const CONNECT_ATTEMPTS: usize = 3;

pub struct QuestStore {
    client: Client,
    write_lock: Mutex<()>,
}

impl QuestStore {
    /// Connect, retrying with exponential backoff, and ensure the table exists.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let (client, connection) = (|| tokio_postgres::connect(url, NoTls))
            .retry(ExponentialBuilder::default().with_max_times(CONNECT_ATTEMPTS))
            .notify(|err: &tokio_postgres::Error, dur: Duration| {
                warn!(error = %err, retry_in_ms = dur.as_millis() as u64, "QuestDB connect failed, retrying");
            })
            .await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "QuestDB connection error");
            }
        });

        let store = Self {
            client,
            write_lock: Mutex::new(()),
        };
        store.init_schema().await?;
        info!("QuestDB indicator store ready");
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        self.client
            .execute(
                "CREATE TABLE IF NOT EXISTS indicator_values (
                    key SYMBOL,
                    value DOUBLE,
                    updated_at TIMESTAMP
                )",
                &[],
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl IndicatorStore for QuestStore {
    async fn get(&self, key: &str) -> Result<Option<f64>, StoreError> {
        let row = self
            .client
            .query_opt(
                "SELECT value FROM indicator_values WHERE key = $1 LIMIT 1",
                &[&key],
            )
            .await?;
        Ok(row.map(|r| {
            let value: f64 = r.get(0);
            value
        }))
    }

    async fn set(&self, key: &str, value: f64) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let updated_at = Utc::now().naive_utc();

        let updated = self
            .client
            .execute(
                "UPDATE indicator_values SET value = $2, updated_at = $3 WHERE key = $1",
                &[&key, &value, &updated_at],
            )
            .await?;

        if updated == 0 {
            self.client
                .execute(
                    "INSERT INTO indicator_values (key, value, updated_at) VALUES ($1, $2, $3)",
                    &[&key, &value, &updated_at],
                )
                .await?;
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "questdb"
    }
}

//! Loading and saving the indicator snapshot through a value store.

use tracing::{debug, info};

use crate::models::indicators::{IndicatorKey, IndicatorSnapshot};
use crate::store::{IndicatorStore, StoreError};

/// Read every indicator once, in canonical order, default-filling gaps.
///
/// A missing key is not an error; only a failing store is.
pub async fn load_snapshot(store: &dyn IndicatorStore) -> Result<IndicatorSnapshot, StoreError> {
    let mut snapshot = IndicatorSnapshot::default();
    let mut defaulted = 0usize;

    for key in IndicatorKey::ALL {
        match store.get(key.as_str()).await? {
            Some(value) => snapshot = snapshot.with(key, value),
            None => {
                debug!(key = %key, default = key.default_value(), "indicator missing, using default");
                defaulted += 1;
            }
        }
    }

    debug!(backend = store.backend(), defaulted, "loaded indicator snapshot");
    Ok(snapshot)
}

/// Write all indicators, in canonical order, with insert-or-update semantics.
pub async fn save_snapshot(
    store: &dyn IndicatorStore,
    snapshot: &IndicatorSnapshot,
) -> Result<(), StoreError> {
    for (key, value) in snapshot.entries() {
        store.set(key.as_str(), value).await?;
    }
    info!(backend = store.backend(), "saved indicator snapshot");
    Ok(())
}

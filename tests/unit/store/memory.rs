//! Unit tests for the in-memory store

use macrolens::store::{IndicatorStore, MemoryStore};

#[tokio::test]
async fn test_get_missing_key_returns_none() {
    let store = MemoryStore::new();
    assert_eq!(store.get("pmi").await.unwrap(), None);
}

#[tokio::test]
async fn test_set_updates_in_place_and_appends() {
    let store = MemoryStore::with_rows([("pmi", 49.0), ("dxy", 104.0)]);
    store.set("pmi", 51.5).await.unwrap();
    store.set("m2", 3.2).await.unwrap();

    assert_eq!(
        store.rows().await,
        vec![
            ("pmi".to_string(), 51.5),
            ("dxy".to_string(), 104.0),
            ("m2".to_string(), 3.2),
        ]
    );
    assert_eq!(store.get("pmi").await.unwrap(), Some(51.5));
    assert_eq!(store.backend(), "memory");
}

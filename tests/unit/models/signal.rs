//! Unit tests for signal records

use macrolens::models::signal::{SignalGroup, SignalRecord, SignalRow};
use tabled::Tabled;

fn record() -> SignalRecord {
    SignalRecord {
        group: SignalGroup::DollarIndex,
        name: "Strong dollar (>105)".to_string(),
        implication: "Pressure on gold, crypto and EM; US assets favored".to_string(),
        favored_assets: vec!["US large-cap equities".to_string(), "USD cash".to_string()],
        unfavored_assets: Vec::new(),
    }
}

#[test]
fn test_signal_row_joins_assets() {
    let row = SignalRow::from(&record());
    assert_eq!(row.signal, "Strong dollar (>105)");
    assert_eq!(row.favored, "US large-cap equities, USD cash");
    assert_eq!(row.unfavored, "");
}

#[test]
fn test_signal_row_headers() {
    let headers: Vec<String> = SignalRow::headers()
        .into_iter()
        .map(|h| h.to_string())
        .collect();
    assert_eq!(
        headers,
        vec!["Signal", "Implication", "Favored Assets", "Unfavored Assets"]
    );
}

#[test]
fn test_serializes_camel_case() {
    let json = serde_json::to_value(record()).unwrap();
    assert_eq!(json["group"], "dollar_index");
    assert_eq!(json["favoredAssets"][1], "USD cash");
    assert!(json["unfavoredAssets"].as_array().unwrap().is_empty());
}

#[test]
fn test_group_ordinals() {
    assert_eq!(SignalGroup::Inflation.ordinal(), 1);
    assert_eq!(SignalGroup::FedFundsRate.ordinal(), 6);
    assert_eq!(SignalGroup::MarginDebt.ordinal(), 10);
    assert!(SignalGroup::Pmi < SignalGroup::Unemployment);
}

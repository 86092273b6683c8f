//! Unit tests for terminal tables

use macrolens::models::indicators::{IndicatorKey, IndicatorSnapshot};
use macrolens::report::{reference_table, signals_table};
use macrolens::signals::engine::SignalEngine;

#[test]
fn test_signals_table_has_header_and_one_line_per_signal() {
    let signals = SignalEngine::evaluate(&IndicatorSnapshot::default());
    let table = signals_table(&signals);
    let header = table
        .lines()
        .find(|line| line.contains("Signal"))
        .unwrap();
    assert!(header.contains("Implication"));
    assert!(header.contains("Favored Assets"));
    assert!(header.contains("Unfavored Assets"));
    for signal in &signals {
        assert_eq!(
            table.lines().filter(|line| line.contains(&signal.name)).count(),
            1
        );
    }
}

#[test]
fn test_signals_table_lines_have_equal_width() {
    let snapshot = IndicatorSnapshot::default().with(IndicatorKey::Dxy, 106.0);
    let table = signals_table(&SignalEngine::evaluate(&snapshot));
    let widths: Vec<usize> = table
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().count())
        .collect();
    assert!(widths.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_signals_table_lists_signals_in_order() {
    let signals = SignalEngine::evaluate(&IndicatorSnapshot::default());
    let table = signals_table(&signals);
    let goldilocks = table.find("Inflation ~2%").unwrap();
    let fed = table.find("Fed Rate >5%").unwrap();
    assert!(goldilocks < fed);
}

#[test]
fn test_empty_signals_table() {
    assert_eq!(signals_table(&[]), "No signals triggered.\n");
}

#[test]
fn test_reference_table_includes_disclaimer() {
    let table = reference_table();
    assert!(table.contains("Margin Debt Peak"));
    assert!(table.contains("Condition"));
    assert!(table.contains("Note: Relationships are historical"));
}

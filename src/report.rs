//! Terminal tables for the CLI.

use tabled::Table;

use crate::models::signal::{SignalRecord, SignalRow};
use crate::signals::reference::{HISTORICAL_REFERENCE, REFERENCE_DISCLAIMER};

pub fn signals_table(signals: &[SignalRecord]) -> String {
    if signals.is_empty() {
        return "No signals triggered.\n".to_string();
    }
    let table = Table::new(signals.iter().map(SignalRow::from)).to_string();
    format!("{}\n", table)
}

pub fn reference_table() -> String {
    let table = Table::new(HISTORICAL_REFERENCE.iter()).to_string();
    format!("{}\n\nNote: {}\n", table, REFERENCE_DISCLAIMER)
}

//! Shared data models: the indicator snapshot and the records derived from it.

pub mod indicators;
pub mod signal;

pub use indicators::{IndicatorKey, IndicatorSnapshot, UnknownIndicatorKey};
pub use signal::{SignalEvaluation, SignalGroup, SignalRecord, SignalRow};

//! Macro dashboard signal engine.
//!
//! Indicator values live in an external key/value store, get loaded into an
//! immutable [`models::IndicatorSnapshot`] and are classified by
//! [`signals::engine::SignalEngine`] into an ordered list of signal records.

pub mod config;
pub mod core;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod report;
pub mod services;
pub mod signals;
pub mod store;

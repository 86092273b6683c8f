//! Services sitting between the stores and the engine.

pub mod indicators;

pub use indicators::{load_snapshot, save_snapshot};

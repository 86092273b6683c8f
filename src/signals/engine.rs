//! Signal evaluation over an indicator snapshot.

use chrono::Utc;
use tracing::{debug, info};

use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::{SignalEvaluation, SignalRecord};
use crate::signals::rules::RULE_GROUPS;

pub struct SignalEngine;

impl SignalEngine {
    /// Classify a snapshot into signal records, ordered by rule group.
    ///
    /// Pure and total: any `f64` input is accepted. Non-finite values go
    /// through the same comparisons, so a NaN simply fails to trigger its
    /// group (inflation still falls back to the ~2% record).
    pub fn evaluate(snapshot: &IndicatorSnapshot) -> Vec<SignalRecord> {
        let signals: Vec<SignalRecord> = RULE_GROUPS
            .iter()
            .filter_map(|rule| rule.evaluate(snapshot))
            .collect();

        for signal in &signals {
            debug!(group = %signal.group, name = %signal.name, "signal triggered");
        }
        info!(
            signal_count = signals.len(),
            inflation = snapshot.inflation(),
            "evaluated indicator snapshot"
        );

        signals
    }

    /// Evaluate and wrap the result together with its input and a timestamp.
    pub fn evaluate_with_snapshot(snapshot: &IndicatorSnapshot) -> SignalEvaluation {
        SignalEvaluation {
            snapshot: *snapshot,
            signals: Self::evaluate(snapshot),
            evaluated_at: Utc::now(),
        }
    }
}

//! Rule-based macro signal evaluation.

pub mod engine;
pub mod reference;
pub mod rules;

pub use engine::SignalEngine;
pub use reference::{ReferenceRow, HISTORICAL_REFERENCE, REFERENCE_DISCLAIMER};
pub use rules::{Comparison, Metric, RuleBranch, RuleGroup, SignalTemplate, RULE_GROUPS};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::Tabled;

use super::indicators::IndicatorSnapshot;

/// Rule groups, declared in evaluation (and display) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalGroup {
    Inflation,
    TenYearYield,
    Pmi,
    Unemployment,
    DollarIndex,
    FedFundsRate,
    DebtToGdp,
    M2Growth,
    RepoRate,
    MarginDebt,
}

impl SignalGroup {
    /// Position in the evaluation order, starting at 1.
    pub fn ordinal(self) -> usize {
        self as usize + 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SignalGroup::Inflation => "inflation",
            SignalGroup::TenYearYield => "ten_year_yield",
            SignalGroup::Pmi => "pmi",
            SignalGroup::Unemployment => "unemployment",
            SignalGroup::DollarIndex => "dollar_index",
            SignalGroup::FedFundsRate => "fed_funds_rate",
            SignalGroup::DebtToGdp => "debt_to_gdp",
            SignalGroup::M2Growth => "m2_growth",
            SignalGroup::RepoRate => "repo_rate",
            SignalGroup::MarginDebt => "margin_debt",
        }
    }
}

impl fmt::Display for SignalGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classification emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRecord {
    pub group: SignalGroup,
    pub name: String,
    pub implication: String,
    pub favored_assets: Vec<String>,
    pub unfavored_assets: Vec<String>,
}

/// Table view of a record, asset lists joined with ", ".
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct SignalRow {
    #[tabled(rename = "Signal")]
    pub signal: String,
    #[tabled(rename = "Implication")]
    pub implication: String,
    #[tabled(rename = "Favored Assets")]
    pub favored: String,
    #[tabled(rename = "Unfavored Assets")]
    pub unfavored: String,
}

impl From<&SignalRecord> for SignalRow {
    fn from(record: &SignalRecord) -> Self {
        Self {
            signal: record.name.clone(),
            implication: record.implication.clone(),
            favored: record.favored_assets.join(", "),
            unfavored: record.unfavored_assets.join(", "),
        }
    }
}

/// Evaluation envelope handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalEvaluation {
    pub snapshot: IndicatorSnapshot,
    pub signals: Vec<SignalRecord>,
    pub evaluated_at: DateTime<Utc>,
}

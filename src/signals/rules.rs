//! The rule-group table.
//!
//! Each group reads one metric and walks its branches like an
//! `if / else if` chain: the first branch whose comparison holds emits its
//! record, and a group with no matching branch emits nothing. Thresholds and
//! operators are exact; boundaries are part of the contract.

use serde::Serialize;

use crate::models::indicators::{IndicatorKey, IndicatorSnapshot};
use crate::models::signal::{SignalGroup, SignalRecord};

/// Threshold test applied to a metric value.
///
/// Plain IEEE-754 comparisons: NaN fails every variant except `Otherwise`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", content = "threshold", rename_all = "snake_case")]
pub enum Comparison {
    GreaterThan(f64),
    GreaterEqual(f64),
    LessThan(f64),
    LessEqual(f64),
    /// Inclusive on both ends.
    InRange(f64, f64),
    Otherwise,
}

impl Comparison {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Comparison::GreaterThan(threshold) => value > threshold,
            Comparison::GreaterEqual(threshold) => value >= threshold,
            Comparison::LessThan(threshold) => value < threshold,
            Comparison::LessEqual(threshold) => value <= threshold,
            Comparison::InRange(low, high) => low <= value && value <= high,
            Comparison::Otherwise => true,
        }
    }
}

/// The value a group classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// `max(core_pce, core_cpi)`, see [`IndicatorSnapshot::inflation`].
    Inflation,
    Indicator(IndicatorKey),
}

impl Metric {
    pub fn read(&self, snapshot: &IndicatorSnapshot) -> f64 {
        match *self {
            Metric::Inflation => snapshot.inflation(),
            Metric::Indicator(key) => snapshot.get(key),
        }
    }

    /// Snapshot fields this metric depends on.
    pub fn inputs(&self) -> Vec<IndicatorKey> {
        match *self {
            Metric::Inflation => vec![IndicatorKey::CorePce, IndicatorKey::CoreCpi],
            Metric::Indicator(key) => vec![key],
        }
    }
}

/// Fixed text and asset lists of a record a branch emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalTemplate {
    pub name: &'static str,
    pub implication: &'static str,
    pub favored: &'static [&'static str],
    pub unfavored: &'static [&'static str],
}

impl SignalTemplate {
    pub fn to_record(&self, group: SignalGroup) -> SignalRecord {
        SignalRecord {
            group,
            name: self.name.to_string(),
            implication: self.implication.to_string(),
            favored_assets: self.favored.iter().map(|s| s.to_string()).collect(),
            unfavored_assets: self.unfavored.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuleBranch {
    pub condition: Comparison,
    pub template: SignalTemplate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuleGroup {
    pub group: SignalGroup,
    pub metric: Metric,
    pub branches: &'static [RuleBranch],
}

impl RuleGroup {
    /// The record emitted by the first matching branch, if any.
    pub fn evaluate(&self, snapshot: &IndicatorSnapshot) -> Option<SignalRecord> {
        let value = self.metric.read(snapshot);
        self.branches
            .iter()
            .find(|branch| branch.condition.matches(value))
            .map(|branch| branch.template.to_record(self.group))
    }
}

const fn branch(
    condition: Comparison,
    name: &'static str,
    implication: &'static str,
    favored: &'static [&'static str],
    unfavored: &'static [&'static str],
) -> RuleBranch {
    RuleBranch {
        condition,
        template: SignalTemplate {
            name,
            implication,
            favored,
            unfavored,
        },
    }
}

/// All rule groups in evaluation order.
pub static RULE_GROUPS: [RuleGroup; 10] = [
    RuleGroup {
        group: SignalGroup::Inflation,
        metric: Metric::Inflation,
        branches: &[
            branch(
                Comparison::GreaterThan(3.0),
                "High Inflation >3%",
                "Fed likely to tighten",
                &["Gold", "BTC", "Short-term bonds"],
                &["Growth/Tech equities"],
            ),
            branch(
                Comparison::LessThan(1.5),
                "Low Inflation <1.5%",
                "Risk of slowdown, Fed easing",
                &["Gold", "Long-term bonds", "REITs"],
                &[],
            ),
            branch(
                Comparison::Otherwise,
                "Inflation ~2%",
                "Goldilocks zone",
                &["Tech/Growth equities", "EM equities"],
                &[],
            ),
        ],
    },
    RuleGroup {
        group: SignalGroup::TenYearYield,
        metric: Metric::Indicator(IndicatorKey::TenY),
        branches: &[
            branch(
                Comparison::GreaterThan(4.5),
                "10Y spike (>4.5%)",
                "High discount rate pressures valuations",
                &["Short-term bonds", "Dividend equities", "Defensives"],
                &["Tech/Growth equities", "REITs"],
            ),
            branch(
                Comparison::LessThan(3.5),
                "10Y low (<3.5%)",
                "Supports risk and safe-haven assets alike (context dependent)",
                &["Gold", "Bitcoin", "Long-term bonds", "REITs"],
                &[],
            ),
        ],
    },
    RuleGroup {
        group: SignalGroup::Pmi,
        metric: Metric::Indicator(IndicatorKey::Pmi),
        branches: &[
            branch(
                Comparison::LessThan(50.0),
                "PMI < 50 (contraction)",
                "Cyclicals lag, safe havens lead",
                &["Gold", "Defensive equities", "Healthcare", "Utilities"],
                &["Cyclicals (Retail/Industrials)"],
            ),
            branch(
                Comparison::GreaterEqual(52.0),
                "PMI > 52 (strong expansion)",
                "Cyclicals, energy and commodities lead",
                &["Industrials", "Energy", "EM equities", "Commodities"],
                &[],
            ),
        ],
    },
    RuleGroup {
        group: SignalGroup::Unemployment,
        metric: Metric::Indicator(IndicatorKey::Unemp),
        branches: &[
            branch(
                Comparison::InRange(3.0, 3.5),
                "Low unemployment (3-3.5%)",
                "Tight labor market, Fed slow to cut",
                &["Defensive equities", "US dollar", "Short-term bonds"],
                &[],
            ),
            branch(
                Comparison::GreaterEqual(4.5),
                "High unemployment (>4.5%)",
                "Recession risk, Fed eases faster",
                &["Gold", "Bitcoin", "Long-term bonds", "REITs (once rates actually fall)"],
                &[],
            ),
        ],
    },
    RuleGroup {
        group: SignalGroup::DollarIndex,
        metric: Metric::Indicator(IndicatorKey::Dxy),
        branches: &[
            branch(
                Comparison::GreaterEqual(105.0),
                "Strong dollar (>105)",
                "Pressure on gold, crypto and EM; US assets favored",
                &["US large-cap equities", "US Treasuries", "USD cash"],
                &["Gold", "Bitcoin", "EM equities"],
            ),
            branch(
                Comparison::LessEqual(100.0),
                "Weak dollar (<100)",
                "Flows into EM, gold and crypto",
                &["Gold", "Bitcoin", "EM equities", "Commodities"],
                &[],
            ),
        ],
    },
    RuleGroup {
        group: SignalGroup::FedFundsRate,
        metric: Metric::Indicator(IndicatorKey::FedRate),
        branches: &[
            branch(
                Comparison::GreaterThan(5.0),
                "Fed Rate >5%",
                "Historic risk of recession",
                &["Short-term bonds", "Defensive equities"],
                &["Tech/Growth equities"],
            ),
            branch(
                Comparison::LessThan(2.0),
                "Fed Rate <2%",
                "Stimulus mode",
                &["Equities", "Gold", "BTC"],
                &[],
            ),
        ],
    },
    RuleGroup {
        group: SignalGroup::DebtToGdp,
        metric: Metric::Indicator(IndicatorKey::DebtGdp),
        branches: &[
            branch(
                Comparison::GreaterThan(120.0),
                "Debt/GDP >120%",
                "Long-term fiscal risk",
                &["Gold", "BTC"],
                &[],
            ),
            branch(
                Comparison::LessThan(80.0),
                "Debt/GDP <80%",
                "Healthy debt level",
                &["Equities", "Bonds"],
                &[],
            ),
        ],
    },
    RuleGroup {
        group: SignalGroup::M2Growth,
        metric: Metric::Indicator(IndicatorKey::M2),
        branches: &[
            branch(
                Comparison::GreaterThan(10.0),
                "M2 Growth >10%",
                "Liquidity boom",
                &["Equities", "Gold", "BTC"],
                &[],
            ),
            branch(
                Comparison::LessThan(0.0),
                "M2 Negative",
                "Liquidity contraction",
                &["Cash", "USD", "Bonds"],
                &[],
            ),
        ],
    },
    RuleGroup {
        group: SignalGroup::RepoRate,
        metric: Metric::Indicator(IndicatorKey::Repo),
        branches: &[branch(
            Comparison::GreaterThan(8.0),
            "Repo Spike >8%",
            "Funding stress",
            &["Gold", "Short-term bonds"],
            &["Equities"],
        )],
    },
    RuleGroup {
        group: SignalGroup::MarginDebt,
        metric: Metric::Indicator(IndicatorKey::Margin),
        branches: &[
            branch(
                Comparison::GreaterThan(1000.0),
                "Margin Debt >1T",
                "Bubble risk",
                &[],
                &["Speculative equities", "Crypto"],
            ),
            branch(
                Comparison::LessThan(500.0),
                "Margin Debt <500B",
                "Low leverage",
                &["Safer markets broadly"],
                &[],
            ),
        ],
    },
];

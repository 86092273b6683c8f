//! Static historical reference table shown next to the live signals.

use serde::Serialize;
use tabled::Tabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Tabled)]
pub struct ReferenceRow {
    #[tabled(rename = "Condition")]
    pub condition: &'static str,
    #[tabled(rename = "Impact")]
    pub impact: &'static str,
    #[tabled(rename = "Favored")]
    pub favored: &'static str,
    #[tabled(rename = "Note")]
    pub note: &'static str,
}

impl ReferenceRow {
    pub const COLUMNS: [&'static str; 4] = ["Condition", "Impact", "Favored", "Note"];
}

const fn row(
    condition: &'static str,
    impact: &'static str,
    favored: &'static str,
    note: &'static str,
) -> ReferenceRow {
    ReferenceRow {
        condition,
        impact,
        favored,
        note,
    }
}

pub static HISTORICAL_REFERENCE: [ReferenceRow; 15] = [
    row("Core PCE/CPI > 3%", "Equities under pressure; gold/crypto positive at times", "Defensives, short-term bonds", ""),
    row("Core PCE/CPI ~2%", "Goldilocks", "Growth/Tech equities, EM", ""),
    row("Core PCE/CPI < 1.5%", "Slowdown risk, Fed eases", "Long-term bonds, gold, REITs", ""),
    row("10Y > 4.5%", "High discount rate", "Dividend/Defensive", ""),
    row("10Y < 3.5%", "Supports risk-on and long bonds", "Gold, BTC, REITs", ""),
    row("PMI < 50", "Contraction", "Defensives, gold", ""),
    row("PMI > 52", "Strong expansion", "Cyclicals, Energy, EM", ""),
    row(
        "Unemp > 4.5%",
        "Recession risk",
        "Safe havens, long-term bonds",
        "Very low unemployment (3-3.5%) can persist for years without an immediate crash; read it together with Fed policy",
    ),
    row("DXY > 105", "Strong USD", "US assets; caution on gold/BTC/EM", ""),
    row("DXY < 100", "Weak USD", "Gold, BTC, EM, Commodities", ""),
    row("Fed Funds >5%", "Recession risk", "Defensive equities, short-term bonds", ""),
    row("M2 Growth >10%", "Assets boom", "Equities, gold, BTC", ""),
    row("M2 <0%", "Liquidity crunch", "Cash, USD", ""),
    row(
        "Margin Debt Peak",
        "Often marks a market top",
        "Bubble assets",
        "No hard threshold (US debt >120% has not crashed because USD is the reserve currency)",
    ),
    row("Repo Spike >8%", "Funding crisis", "Gold, short-term bonds", ""),
];

pub const REFERENCE_DISCLAIMER: &str = "Relationships are historical, not a guarantee of future \
results. Consider liquidity, policy and geopolitics as well.";

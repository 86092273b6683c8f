use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The closed set of indicator keys understood by the store.
///
/// Keys are snake_case and this is the only spelling accepted; display labels
/// such as "Core PCE" are presentation text and never resolve to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKey {
    CorePce,
    CoreCpi,
    TenY,
    FedRate,
    Pmi,
    Unemp,
    Dxy,
    DebtGdp,
    M2,
    Repo,
    Margin,
    Gold,
    Spx,
    Btc,
}

impl IndicatorKey {
    /// Canonical order, used for loading and saving.
    pub const ALL: [IndicatorKey; 14] = [
        IndicatorKey::CorePce,
        IndicatorKey::CoreCpi,
        IndicatorKey::TenY,
        IndicatorKey::FedRate,
        IndicatorKey::Pmi,
        IndicatorKey::Unemp,
        IndicatorKey::Dxy,
        IndicatorKey::DebtGdp,
        IndicatorKey::M2,
        IndicatorKey::Repo,
        IndicatorKey::Margin,
        IndicatorKey::Gold,
        IndicatorKey::Spx,
        IndicatorKey::Btc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorKey::CorePce => "core_pce",
            IndicatorKey::CoreCpi => "core_cpi",
            IndicatorKey::TenY => "ten_y",
            IndicatorKey::FedRate => "fed_rate",
            IndicatorKey::Pmi => "pmi",
            IndicatorKey::Unemp => "unemp",
            IndicatorKey::Dxy => "dxy",
            IndicatorKey::DebtGdp => "debt_gdp",
            IndicatorKey::M2 => "m2",
            IndicatorKey::Repo => "repo",
            IndicatorKey::Margin => "margin",
            IndicatorKey::Gold => "gold",
            IndicatorKey::Spx => "spx",
            IndicatorKey::Btc => "btc",
        }
    }

    /// Human-readable label with unit, for forms and tables.
    pub fn label(self) -> &'static str {
        match self {
            IndicatorKey::CorePce => "Core PCE YoY (%)",
            IndicatorKey::CoreCpi => "Core CPI YoY (%)",
            IndicatorKey::TenY => "US 10Y Yield (%)",
            IndicatorKey::FedRate => "Fed Funds Rate (%)",
            IndicatorKey::Pmi => "ISM Manufacturing PMI",
            IndicatorKey::Unemp => "Unemployment Rate (%)",
            IndicatorKey::Dxy => "Dollar Index (DXY)",
            IndicatorKey::DebtGdp => "Debt-to-GDP (%)",
            IndicatorKey::M2 => "M2 Growth YoY (%)",
            IndicatorKey::Repo => "Repo Rate (%)",
            IndicatorKey::Margin => "Margin Debt (USD bn)",
            IndicatorKey::Gold => "Gold (USD/oz)",
            IndicatorKey::Spx => "S&P 500",
            IndicatorKey::Btc => "Bitcoin (USD)",
        }
    }

    /// Value used when the store has no entry for this key.
    pub fn default_value(self) -> f64 {
        match self {
            IndicatorKey::CorePce => 2.0,
            IndicatorKey::CoreCpi => 2.2,
            IndicatorKey::TenY => 4.0,
            IndicatorKey::FedRate => 5.25,
            IndicatorKey::Pmi => 50.0,
            IndicatorKey::Unemp => 3.8,
            IndicatorKey::Dxy => 103.0,
            IndicatorKey::DebtGdp => 120.0,
            IndicatorKey::M2 => 2.0,
            IndicatorKey::Repo => 5.0,
            IndicatorKey::Margin => 900.0,
            IndicatorKey::Gold => 2500.0,
            IndicatorKey::Spx => 5600.0,
            IndicatorKey::Btc => 70000.0,
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownIndicatorKey(pub String);

impl fmt::Display for UnknownIndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown indicator key '{}'", self.0)
    }
}

impl std::error::Error for UnknownIndicatorKey {}

impl FromStr for IndicatorKey {
    type Err = UnknownIndicatorKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndicatorKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownIndicatorKey(s.to_string()))
    }
}

/// Current values of every recognised indicator.
///
/// Every field is always present; missing store entries and missing JSON
/// fields fall back to [`IndicatorKey::default_value`]. Non-finite values
/// travel as the strings `"NaN"`, `"inf"` and `"-inf"` (see [`non_finite`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorSnapshot {
    #[serde(with = "non_finite")]
    pub core_pce: f64,
    #[serde(with = "non_finite")]
    pub core_cpi: f64,
    #[serde(with = "non_finite")]
    pub ten_y: f64,
    #[serde(with = "non_finite")]
    pub fed_rate: f64,
    #[serde(with = "non_finite")]
    pub pmi: f64,
    #[serde(with = "non_finite")]
    pub unemp: f64,
    #[serde(with = "non_finite")]
    pub dxy: f64,
    #[serde(with = "non_finite")]
    pub debt_gdp: f64,
    #[serde(with = "non_finite")]
    pub m2: f64,
    #[serde(with = "non_finite")]
    pub repo: f64,
    #[serde(with = "non_finite")]
    pub margin: f64,
    #[serde(with = "non_finite")]
    pub gold: f64,
    #[serde(with = "non_finite")]
    pub spx: f64,
    #[serde(with = "non_finite")]
    pub btc: f64,
}

impl Default for IndicatorSnapshot {
    fn default() -> Self {
        Self {
            core_pce: IndicatorKey::CorePce.default_value(),
            core_cpi: IndicatorKey::CoreCpi.default_value(),
            ten_y: IndicatorKey::TenY.default_value(),
            fed_rate: IndicatorKey::FedRate.default_value(),
            pmi: IndicatorKey::Pmi.default_value(),
            unemp: IndicatorKey::Unemp.default_value(),
            dxy: IndicatorKey::Dxy.default_value(),
            debt_gdp: IndicatorKey::DebtGdp.default_value(),
            m2: IndicatorKey::M2.default_value(),
            repo: IndicatorKey::Repo.default_value(),
            margin: IndicatorKey::Margin.default_value(),
            gold: IndicatorKey::Gold.default_value(),
            spx: IndicatorKey::Spx.default_value(),
            btc: IndicatorKey::Btc.default_value(),
        }
    }
}

impl IndicatorSnapshot {
    /// Build a snapshot from raw store values, default-filling absent keys.
    /// Entries under unrecognised keys are ignored.
    pub fn from_values(values: &HashMap<String, f64>) -> Self {
        IndicatorKey::ALL
            .into_iter()
            .fold(Self::default(), |snapshot, key| match values.get(key.as_str()) {
                Some(&value) => snapshot.with(key, value),
                None => snapshot,
            })
    }

    pub fn get(&self, key: IndicatorKey) -> f64 {
        match key {
            IndicatorKey::CorePce => self.core_pce,
            IndicatorKey::CoreCpi => self.core_cpi,
            IndicatorKey::TenY => self.ten_y,
            IndicatorKey::FedRate => self.fed_rate,
            IndicatorKey::Pmi => self.pmi,
            IndicatorKey::Unemp => self.unemp,
            IndicatorKey::Dxy => self.dxy,
            IndicatorKey::DebtGdp => self.debt_gdp,
            IndicatorKey::M2 => self.m2,
            IndicatorKey::Repo => self.repo,
            IndicatorKey::Margin => self.margin,
            IndicatorKey::Gold => self.gold,
            IndicatorKey::Spx => self.spx,
            IndicatorKey::Btc => self.btc,
        }
    }

    /// Copy of this snapshot with one value replaced.
    pub fn with(mut self, key: IndicatorKey, value: f64) -> Self {
        let slot = match key {
            IndicatorKey::CorePce => &mut self.core_pce,
            IndicatorKey::CoreCpi => &mut self.core_cpi,
            IndicatorKey::TenY => &mut self.ten_y,
            IndicatorKey::FedRate => &mut self.fed_rate,
            IndicatorKey::Pmi => &mut self.pmi,
            IndicatorKey::Unemp => &mut self.unemp,
            IndicatorKey::Dxy => &mut self.dxy,
            IndicatorKey::DebtGdp => &mut self.debt_gdp,
            IndicatorKey::M2 => &mut self.m2,
            IndicatorKey::Repo => &mut self.repo,
            IndicatorKey::Margin => &mut self.margin,
            IndicatorKey::Gold => &mut self.gold,
            IndicatorKey::Spx => &mut self.spx,
            IndicatorKey::Btc => &mut self.btc,
        };
        *slot = value;
        self
    }

    /// `(key, value)` pairs in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (IndicatorKey, f64)> + '_ {
        IndicatorKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Inflation gauge: the larger of core PCE and core CPI.
    ///
    /// CPI is taken only when it compares strictly greater, so a NaN in
    /// either input never promotes CPI over PCE.
    pub fn inflation(&self) -> f64 {
        if self.core_cpi > self.core_pce {
            self.core_cpi
        } else {
            self.core_pce
        }
    }
}

/// Serde codec for `f64` fields that may hold NaN or an infinity.
///
/// JSON numbers cannot express them, so they are written as `"NaN"`, `"inf"`
/// or `"-inf"`. Reading accepts any number, or a string `f64::from_str`
/// parses to a non-finite value.
pub mod non_finite {
    use serde::de::{self, Deserializer, Unexpected, Visitor};
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(NumberOrToken)
    }

    struct NumberOrToken;

    impl<'de> Visitor<'de> for NumberOrToken {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number, \"NaN\", \"inf\" or \"-inf\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| !value.is_finite())
                .ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
        }
    }
}

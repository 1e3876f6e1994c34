use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Supported currency pair from the fixed catalog.
///
/// Equality and ordering follow the canonical string (`BTC/CHF` < `BTC/EUR` < `BTC/USD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Pair {
    BtcUsd,
    BtcChf,
    BtcEur,
}

impl Pair {
    /// Catalog in declaration order.
    pub const ALL: [Self; 3] = [Self::BtcUsd, Self::BtcChf, Self::BtcEur];

    /// Parse after trimming whitespace and upper-casing.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "BTC/USD" => Ok(Self::BtcUsd),
            "BTC/CHF" => Ok(Self::BtcChf),
            "BTC/EUR" => Ok(Self::BtcEur),
            _ => Err(ValidationError::UnsupportedPair { value: normalized }),
        }
    }

    pub fn is_supported(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// Catalog sorted by canonical string.
    pub fn catalog() -> Vec<Self> {
        let mut pairs = Self::ALL.to_vec();
        pairs.sort();
        pairs
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BtcUsd => "BTC/USD",
            Self::BtcChf => "BTC/CHF",
            Self::BtcEur => "BTC/EUR",
        }
    }
}

impl Ord for Pair {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Pair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Pair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pair {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Pair {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Pair> for String {
    fn from(value: Pair) -> Self {
        value.as_str().to_owned()
    }
}

/// Ordered, de-duplicated pairs parsed from a comma-separated pair list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSet(Vec<Pair>);

impl PairSet {
    /// Parse a raw pair list such as `"btc/usd, BTC/EUR"`.
    ///
    /// Only an empty string expands to the full catalog. Any token outside the
    /// catalog fails the whole parse, including one that trims to nothing
    /// (`"   "`, or a stray comma).
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Ok(Self::all());
        }

        let mut pairs: Vec<Pair> = Vec::new();
        for token in raw.split(',') {
            let pair = Pair::parse(token)?;
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
        }

        if pairs.is_empty() {
            return Err(ValidationError::EmptyPairSet);
        }

        Ok(Self(pairs))
    }

    pub fn all() -> Self {
        Self(Pair::ALL.to_vec())
    }

    pub fn as_slice(&self) -> &[Pair] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pair> + '_ {
        self.0.iter().copied()
    }
}

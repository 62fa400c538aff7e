use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of the adjusted trade table produced by the upstream ETL.
///
/// Column names match the broker export (`Symbol`, `Quantity`, `Proceeds`,
/// `Date/Time`). Any other columns in the source file are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Ticker symbol (never empty once loaded)
    #[serde(rename = "Symbol")]
    pub symbol: String,

    /// Signed quantity: positive for buys, negative for sells
    #[serde(rename = "Quantity")]
    pub quantity: f64,

    /// Signed cash proceeds of the trade
    #[serde(rename = "Proceeds")]
    pub proceeds: f64,

    /// Execution timestamp
    #[serde(rename = "Date/Time", with = "timestamp")]
    pub date_time: NaiveDateTime,
}

impl TradeRecord {
    pub fn new(
        symbol: impl Into<String>,
        quantity: f64,
        proceeds: f64,
        date_time: NaiveDateTime,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            proceeds,
            date_time,
        }
    }
}

/// The full trade history, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeTable {
    pub records: Vec<TradeRecord>,
}

impl TradeTable {
    pub fn new(records: Vec<TradeRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First `n` rows, for preview tables.
    pub fn head(&self, n: usize) -> &[TradeRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Sorted, de-duplicated symbols (drives the stock picker).
    pub fn symbols(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.symbol.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.records.iter().any(|r| r.symbol == symbol)
    }

    pub fn for_symbol<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a TradeRecord> + 'a {
        self.records.iter().filter(move |r| r.symbol == symbol)
    }

    pub fn total_quantity(&self) -> f64 {
        self.records.iter().map(|r| r.quantity).sum()
    }
}

impl FromIterator<TradeRecord> for TradeTable {
    fn from_iter<I: IntoIterator<Item = TradeRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Serde adapter for `Date/Time` values.
///
/// Writes `YYYY-MM-DD HH:MM:SS`; reads that, ISO-8601 with a `T`
/// separator (optionally with fractional seconds), the broker's
/// `YYYY-MM-DD, HH:MM:SS` form, or a bare date (midnight).
pub mod timestamp {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    const READ_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d, %H:%M:%S",
    ];

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let s = raw.trim();
        READ_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(WRITE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("unparseable timestamp '{raw}'")))
    }
}

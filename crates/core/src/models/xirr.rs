use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreError;

/// A per-symbol XIRR as delivered by the upstream calculation.
///
/// `Rate` may still hold NaN when the solver failed to converge;
/// `NonNumeric` keeps whatever non-number the producer wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XirrValue {
    Rate(f64),
    NonNumeric(String),
}

impl XirrValue {
    /// JSON numbers are rates; strings, nulls and everything else are not.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(rate) => XirrValue::Rate(rate),
                None => XirrValue::NonNumeric(n.to_string()),
            },
            other => XirrValue::NonNumeric(other.to_string()),
        }
    }

    /// The rate, if it is numeric and not NaN.
    pub fn display_rate(&self) -> Option<f64> {
        match self {
            XirrValue::Rate(rate) if !rate.is_nan() => Some(*rate),
            _ => None,
        }
    }
}

/// Symbol → XIRR map. Keys are unique and iterate in symbol order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct XirrResults {
    entries: BTreeMap<String, XirrValue>,
}

impl XirrResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `symbol: value` pairs.
    ///
    /// Bare `NaN`, `Infinity` and `-Infinity` tokens (as written by
    /// Python's `json.dump`) are accepted and become non-finite rates.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let raw: BTreeMap<String, Value> = serde_json::from_str(&quote_non_finite(json))
            .map_err(|e| CoreError::InvalidDataset {
                name: "xirr_results".into(),
                message: e.to_string(),
            })?;
        Ok(raw
            .iter()
            .map(|(symbol, value)| {
                let value = match value {
                    Value::String(s) => match non_finite_rate(s) {
                        Some(rate) => XirrValue::Rate(rate),
                        None => XirrValue::from_json(value),
                    },
                    other => XirrValue::from_json(other),
                };
                (symbol.clone(), value)
            })
            .collect())
    }

    pub fn insert(&mut self, symbol: impl Into<String>, value: XirrValue) {
        self.entries.insert(symbol.into(), value);
    }

    pub fn get(&self, symbol: &str) -> Option<&XirrValue> {
        self.entries.get(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &XirrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, XirrValue)> for XirrResults {
    fn from_iter<I: IntoIterator<Item = (String, XirrValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// `-Infinity` must precede `Infinity`.
const NON_FINITE: [(&str, f64); 3] = [
    ("-Infinity", f64::NEG_INFINITY),
    ("Infinity", f64::INFINITY),
    ("NaN", f64::NAN),
];

/// Prefix of the placeholder strings; real symbols never start with U+0001.
const NON_FINITE_TAG: char = '\u{1}';

/// Turn bare non-finite tokens outside string literals into tagged
/// placeholder strings (`NaN` → `"\u0001NaN"`).
fn quote_non_finite(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = json;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some((token, _)) = NON_FINITE.iter().find(|(token, _)| rest.starts_with(token)) {
            out.push_str("\"\\u0001");
            out.push_str(token);
            out.push('"');
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

fn non_finite_rate(s: &str) -> Option<f64> {
    let token = s.strip_prefix(NON_FINITE_TAG)?;
    NON_FINITE
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, rate)| *rate)
}

/// How XIRR values are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum XirrDisplayMode {
    /// Scaled ×100 and rounded to two decimals (`0.153` → `15.3`)
    #[default]
    Percent,
    /// Left as a fractional rate; formatted as a percentage when shown
    Fraction,
}

impl std::fmt::Display for XirrDisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            XirrDisplayMode::Percent => write!(f, "percent"),
            XirrDisplayMode::Fraction => write!(f, "fraction"),
        }
    }
}

impl std::str::FromStr for XirrDisplayMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percent" => Ok(XirrDisplayMode::Percent),
            "fraction" => Ok(XirrDisplayMode::Fraction),
            other => Err(CoreError::ValidationError(format!(
                "unknown XIRR display mode '{other}' (expected 'percent' or 'fraction')"
            ))),
        }
    }
}

/// One display-eligible XIRR entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XirrRow {
    pub symbol: String,
    pub value: f64,
}

/// Cleaned XIRR table, sorted descending by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XirrTable {
    pub mode: XirrDisplayMode,
    pub rows: Vec<XirrRow>,
}

impl XirrTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.rows.iter().find(|r| r.symbol == symbol).map(|r| r.value)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.symbol.as_str())
    }

    /// Column header matching the display mode.
    pub fn value_header(&self) -> &'static str {
        match self.mode {
            XirrDisplayMode::Percent => "XIRR (%)",
            XirrDisplayMode::Fraction => "XIRR",
        }
    }

    /// Human-readable percentage for a value stored in this table's mode.
    pub fn format_value(&self, value: f64) -> String {
        match self.mode {
            XirrDisplayMode::Percent => format!("{value:.2}%"),
            XirrDisplayMode::Fraction => format!("{:.2}%", value * 100.0),
        }
    }
}

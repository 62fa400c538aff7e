use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::table::SeriesPoint;

/// Summed traded quantity for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolVolume {
    pub symbol: String,
    pub quantity: f64,
}

/// What to do with months in which a symbol had no trades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapPolicy {
    /// Leave the month out of the series
    #[default]
    Skip,
    /// Insert a zero row for every month between the first and last trade
    ZeroFill,
}

/// Trading activity of one symbol within one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Last calendar day of the month (the bucket label)
    pub month_end: NaiveDate,
    pub quantity: f64,
    pub proceeds: f64,
}

/// Month-end resampled quantity and proceeds for a single symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyActivity {
    pub symbol: String,
    pub points: Vec<MonthlyPoint>,
}

impl MonthlyActivity {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_quantity(&self) -> f64 {
        self.points.iter().map(|p| p.quantity).sum()
    }

    pub fn total_proceeds(&self) -> f64 {
        self.points.iter().map(|p| p.proceeds).sum()
    }

    pub fn quantity_series(&self) -> Vec<SeriesPoint> {
        self.points
            .iter()
            .map(|p| SeriesPoint {
                date: p.month_end,
                value: p.quantity,
            })
            .collect()
    }

    pub fn proceeds_series(&self) -> Vec<SeriesPoint> {
        self.points
            .iter()
            .map(|p| SeriesPoint {
                date: p.month_end,
                value: p.proceeds,
            })
            .collect()
    }
}

/// Headline figures taken from the latest rows of the valuation and
/// holdings tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    /// Date of the latest valuation row
    pub as_of: NaiveDate,

    /// `Total Value` of the latest valuation row, unrounded
    pub current_total_value: f64,

    /// Date of the latest holdings row
    pub holdings_as_of: NaiveDate,

    /// Non-zero cells in the latest holdings row (short positions count)
    pub active_holdings: usize,
}

/// A non-zero position in the holdings snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub quantity: f64,
}

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::errors::CoreError;
use crate::models::analytics::{
    GapPolicy, MonthlyActivity, MonthlyPoint, Position, SnapshotSummary, SymbolVolume,
};
use crate::models::table::{SeriesPoint, TimeTable};
use crate::models::trade::TradeTable;
use crate::models::valuation::{DailyValueSeries, TOTAL_VALUE_COLUMN};
use crate::models::xirr::{XirrDisplayMode, XirrResults, XirrRow, XirrTable};

/// Derives the dashboard's views from the loaded datasets.
///
/// Pure functions over immutable inputs. No I/O, no state.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// Total traded quantity per symbol, largest first.
    /// Equal totals are ordered by symbol.
    pub fn trade_volume_by_symbol(&self, trades: &TradeTable) -> Vec<SymbolVolume> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for record in &trades.records {
            *totals.entry(record.symbol.as_str()).or_insert(0.0) += record.quantity;
        }

        let mut volumes: Vec<SymbolVolume> = totals
            .into_iter()
            .map(|(symbol, quantity)| SymbolVolume {
                symbol: symbol.to_string(),
                quantity,
            })
            .collect();
        // Stable sort keeps the alphabetical order among ties
        volumes.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));
        volumes
    }

    /// Display-ready XIRR table: numeric, non-NaN entries only, sorted
    /// descending. Everything else is dropped silently.
    pub fn xirr_table(&self, results: &XirrResults, mode: XirrDisplayMode) -> XirrTable {
        let mut rows: Vec<XirrRow> = results
            .iter()
            .filter_map(|(symbol, value)| {
                let rate = value.display_rate()?;
                let value = match mode {
                    XirrDisplayMode::Percent => round2(rate * 100.0),
                    XirrDisplayMode::Fraction => rate,
                };
                Some(XirrRow {
                    symbol: symbol.to_string(),
                    value,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.value.total_cmp(&a.value));
        XirrTable { mode, rows }
    }

    /// Month-end resampled quantity and proceeds for one symbol.
    ///
    /// Rows are bucketed by the last calendar day of their month. With
    /// `GapPolicy::Skip` months without trades are absent; with
    /// `GapPolicy::ZeroFill` every month between the first and last
    /// bucket is present.
    pub fn monthly_activity(
        &self,
        trades: &TradeTable,
        symbol: &str,
        gaps: GapPolicy,
    ) -> MonthlyActivity {
        let mut buckets: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for record in trades.for_symbol(symbol) {
            let bucket = buckets
                .entry(month_end(record.date_time.date()))
                .or_insert((0.0, 0.0));
            bucket.0 += record.quantity;
            bucket.1 += record.proceeds;
        }

        if gaps == GapPolicy::ZeroFill {
            let bounds = buckets.keys().next().copied().zip(buckets.keys().last().copied());
            if let Some((first, last)) = bounds {
                let mut month = first;
                while month < last {
                    month = match month.succ_opt() {
                        Some(next) => month_end(next),
                        None => break,
                    };
                    buckets.entry(month).or_insert((0.0, 0.0));
                }
            }
        }

        MonthlyActivity {
            symbol: symbol.to_string(),
            points: buckets
                .into_iter()
                .map(|(month_end, (quantity, proceeds))| MonthlyPoint {
                    month_end,
                    quantity,
                    proceeds,
                })
                .collect(),
        }
    }

    /// Current total value and number of active holdings.
    ///
    /// The value is the last valuation row's `Total Value`, unrounded.
    /// A holding is active when its cell in the last holdings row is
    /// present and non-zero, whatever its sign.
    pub fn snapshot_summary(
        &self,
        daily_value: &DailyValueSeries,
        holdings: &TimeTable,
    ) -> Result<SnapshotSummary, CoreError> {
        let value_row = daily_value
            .table()
            .last_row()
            .ok_or_else(|| CoreError::EmptyDataset("daily_stocks_value".into()))?;
        let holdings_row = holdings
            .last_row()
            .ok_or_else(|| CoreError::EmptyDataset("holdings_pivot".into()))?;

        let idx = daily_value
            .table()
            .column_index(TOTAL_VALUE_COLUMN)
            .ok_or_else(|| CoreError::MissingColumn {
                dataset: "daily_stocks_value".into(),
                column: TOTAL_VALUE_COLUMN.into(),
            })?;
        let current_total_value = value_row.values.get(idx).copied().flatten().ok_or_else(|| {
            CoreError::ValidationError(format!(
                "'{TOTAL_VALUE_COLUMN}' is missing on {}",
                value_row.date
            ))
        })?;

        let active_holdings = holdings_row
            .values
            .iter()
            .filter(|cell| cell.is_some_and(|q| q != 0.0))
            .count();

        Ok(SnapshotSummary {
            as_of: value_row.date,
            current_total_value,
            holdings_as_of: holdings_row.date,
            active_holdings,
        })
    }

    /// Non-zero positions of the latest holdings row, largest absolute
    /// quantity first.
    pub fn active_positions(&self, holdings: &TimeTable) -> Vec<Position> {
        let mut positions: Vec<Position> = holdings
            .snapshot()
            .into_iter()
            .filter_map(|(symbol, cell)| match cell {
                Some(quantity) if quantity != 0.0 => Some(Position {
                    symbol: symbol.to_string(),
                    quantity,
                }),
                _ => None,
            })
            .collect();
        positions.sort_by(|a, b| b.quantity.abs().total_cmp(&a.quantity.abs()));
        positions
    }

    /// Price history of one symbol; empty if the price table has no such column.
    pub fn price_history(&self, prices: &TimeTable, symbol: &str) -> Vec<SeriesPoint> {
        prices.column_series(symbol).unwrap_or_default()
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

/// Last calendar day of `date`'s month.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

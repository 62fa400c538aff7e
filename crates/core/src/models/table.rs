use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A single (date, value) observation, one point of a line chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One dated row of a [`TimeTable`]. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRow {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

/// A date-indexed table with named numeric columns.
///
/// Used for the price table (one column per symbol), the holdings pivot
/// (quantity held per symbol) and the daily portfolio value series.
/// Rows are strictly ascending by date and every row has one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeTable {
    pub columns: Vec<String>,
    pub rows: Vec<TimeRow>,
}

/// On-disk shape: a dataframe exported in "split" orientation.
#[derive(Deserialize)]
struct SplitFrame {
    columns: Vec<String>,
    index: Vec<String>,
    data: Vec<Vec<Option<f64>>>,
}

impl TimeTable {
    /// Build a table, checking shape and date ordering.
    pub fn new(name: &str, columns: Vec<String>, rows: Vec<TimeRow>) -> Result<Self, CoreError> {
        let invalid = |message: String| CoreError::InvalidDataset {
            name: name.to_string(),
            message,
        };

        for (i, row) in rows.iter().enumerate() {
            if row.values.len() != columns.len() {
                return Err(invalid(format!(
                    "row {i} ({}) has {} cells, expected {}",
                    row.date,
                    row.values.len(),
                    columns.len()
                )));
            }
        }
        for pair in rows.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(invalid(format!(
                    "dates must be strictly ascending: {} follows {}",
                    pair[1].date, pair[0].date
                )));
            }
        }

        Ok(Self { columns, rows })
    }

    /// Parse a split-orientation JSON document:
    /// `{"columns": [...], "index": [...], "data": [[...], ...]}`.
    pub fn from_split_json(name: &str, json: &str) -> Result<Self, CoreError> {
        let frame: SplitFrame = serde_json::from_str(json).map_err(|e| CoreError::InvalidDataset {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        if frame.index.len() != frame.data.len() {
            return Err(CoreError::InvalidDataset {
                name: name.to_string(),
                message: format!(
                    "index has {} entries but data has {} rows",
                    frame.index.len(),
                    frame.data.len()
                ),
            });
        }

        let rows = frame
            .index
            .iter()
            .zip(frame.data)
            .map(|(raw, values)| {
                let date = parse_index_date(raw).ok_or_else(|| CoreError::InvalidDataset {
                    name: name.to_string(),
                    message: format!("unparseable index date '{raw}'"),
                })?;
                Ok(TimeRow { date, values })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        Self::new(name, frame.columns, rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// The most recent row (the snapshot).
    pub fn last_row(&self) -> Option<&TimeRow> {
        self.rows.last()
    }

    /// All present values of one column, in date order.
    /// Returns `None` if the column does not exist.
    pub fn column_series(&self, column: &str) -> Option<Vec<SeriesPoint>> {
        let idx = self.column_index(column)?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| {
                    row.values.get(idx).copied().flatten().map(|value| SeriesPoint {
                        date: row.date,
                        value,
                    })
                })
                .collect(),
        )
    }

    /// Column name / cell pairs of the last row.
    pub fn snapshot(&self) -> Vec<(&str, Option<f64>)> {
        match self.last_row() {
            Some(row) => self
                .columns
                .iter()
                .map(String::as_str)
                .zip(row.values.iter().copied())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Index labels may be plain dates or full timestamps; the time part is dropped.
fn parse_index_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    let date_part = s.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::table::{SeriesPoint, TimeTable};

/// Name of the aggregate value column in the daily valuation table.
pub const TOTAL_VALUE_COLUMN: &str = "Total Value";

/// Daily portfolio valuation: a [`TimeTable`] guaranteed to carry a
/// `Total Value` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyValueSeries {
    table: TimeTable,
}

impl Default for DailyValueSeries {
    fn default() -> Self {
        Self {
            table: TimeTable {
                columns: vec![TOTAL_VALUE_COLUMN.to_string()],
                rows: Vec::new(),
            },
        }
    }
}

impl DailyValueSeries {
    pub fn new(table: TimeTable) -> Result<Self, CoreError> {
        if table.column_index(TOTAL_VALUE_COLUMN).is_none() {
            return Err(CoreError::MissingColumn {
                dataset: "daily_stocks_value".into(),
                column: TOTAL_VALUE_COLUMN.into(),
            });
        }
        Ok(Self { table })
    }

    pub fn table(&self) -> &TimeTable {
        &self.table
    }

    pub fn into_table(self) -> TimeTable {
        self.table
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The `Total Value` line, skipping missing cells.
    pub fn total_value_series(&self) -> Vec<SeriesPoint> {
        self.table
            .column_series(TOTAL_VALUE_COLUMN)
            .unwrap_or_default()
    }
}

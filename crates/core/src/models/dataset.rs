use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::table::TimeTable;
use super::trade::TradeTable;
use super::valuation::DailyValueSeries;
use super::xirr::XirrResults;

/// The five persisted artifacts the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Trades,
    Prices,
    Holdings,
    DailyValue,
    Xirr,
}

impl DatasetKind {
    /// File name without extension, as written by the upstream ETL.
    pub fn file_stem(&self) -> &'static str {
        match self {
            DatasetKind::Trades => "adjusted_df",
            DatasetKind::Prices => "price_data",
            DatasetKind::Holdings => "holdings_pivot",
            DatasetKind::DailyValue => "daily_stocks_value",
            DatasetKind::Xirr => "xirr_results",
        }
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_stem())
    }
}

/// All five datasets, loaded together and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetBundle {
    pub trades: TradeTable,
    pub prices: TimeTable,
    pub holdings: TimeTable,
    pub daily_value: DailyValueSeries,
    pub xirr: XirrResults,
}

impl DatasetBundle {
    /// Re-check the table invariants of a bundle that was decoded without
    /// going through the table constructors.
    pub fn validated(self) -> Result<Self, CoreError> {
        let Self {
            trades,
            prices,
            holdings,
            daily_value,
            xirr,
        } = self;
        let recheck = |kind: DatasetKind, table: TimeTable| {
            TimeTable::new(kind.file_stem(), table.columns, table.rows)
        };

        Ok(Self {
            trades,
            prices: recheck(DatasetKind::Prices, prices)?,
            holdings: recheck(DatasetKind::Holdings, holdings)?,
            daily_value: DailyValueSeries::new(recheck(
                DatasetKind::DailyValue,
                daily_value.into_table(),
            )?)?,
            xirr,
        })
    }
}

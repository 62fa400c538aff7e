use std::io::Read;
use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::CoreError;
use crate::models::dataset::{DatasetBundle, DatasetKind};
use crate::models::table::TimeTable;
use crate::models::trade::{TradeRecord, TradeTable};
use crate::models::valuation::DailyValueSeries;
use crate::models::xirr::XirrResults;

use super::manager::StorageManager;

/// File extension of a packed dataset bundle.
pub const BUNDLE_EXTENSION: &str = "pfdb";

/// Reads the five persisted datasets into memory. No transformation
/// beyond parsing and shape validation.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load from a bundle file (`*.pfdb`) or from a dataset directory.
    pub fn load(path: impl AsRef<Path>) -> Result<DatasetBundle, CoreError> {
        let path = path.as_ref();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(BUNDLE_EXTENSION))
        {
            StorageManager::load_from_file(path)
        } else {
            Self::load_dir(path)
        }
    }

    /// Load every dataset from `dir`. Any missing or unreadable file is fatal.
    ///
    /// Expected files: `adjusted_df.json` (or `.csv`), `price_data.json`,
    /// `holdings_pivot.json`, `daily_stocks_value.json`, `xirr_results.json`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<DatasetBundle, CoreError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(CoreError::DatasetMissing {
                name: "data directory".into(),
                location: dir.display().to_string(),
            });
        }

        let trades = Self::load_trades(dir)?;
        let prices = Self::load_time_table(dir, DatasetKind::Prices)?;
        let holdings = Self::load_time_table(dir, DatasetKind::Holdings)?;
        let daily_value = DailyValueSeries::new(Self::load_time_table(dir, DatasetKind::DailyValue)?)?;
        let xirr = XirrResults::from_json_str(&read_dataset(dir, DatasetKind::Xirr, "json")?)?;

        debug!(
            "loaded datasets from {}: {} trades, {} price rows, {} holdings rows, {} valuation rows, {} xirr entries",
            dir.display(),
            trades.len(),
            prices.len(),
            holdings.len(),
            daily_value.table().len(),
            xirr.len()
        );

        Ok(DatasetBundle {
            trades,
            prices,
            holdings,
            daily_value,
            xirr,
        })
    }

    /// Trades come as JSON records or, failing that, a CSV export.
    fn load_trades(dir: &Path) -> Result<TradeTable, CoreError> {
        let kind = DatasetKind::Trades;
        let json_path = dataset_path(dir, kind, "json");
        if json_path.is_file() {
            return parse_trades_json(&std::fs::read_to_string(json_path)?);
        }
        let csv_path = dataset_path(dir, kind, "csv");
        if csv_path.is_file() {
            return parse_trades_csv(std::fs::File::open(csv_path)?);
        }
        Err(CoreError::DatasetMissing {
            name: kind.to_string(),
            location: dir.display().to_string(),
        })
    }

    fn load_time_table(dir: &Path, kind: DatasetKind) -> Result<TimeTable, CoreError> {
        let json = read_dataset(dir, kind, "json")?;
        TimeTable::from_split_json(kind.file_stem(), &json)
    }
}

/// Parse a JSON array of trade records.
pub fn parse_trades_json(json: &str) -> Result<TradeTable, CoreError> {
    let records: Vec<TradeRecord> = serde_json::from_str(json).map_err(|e| invalid_trades(e.to_string()))?;
    validate_trades(records)
}

/// Parse a CSV trade export with a header row.
pub fn parse_trades_csv<R: Read>(reader: R) -> Result<TradeTable, CoreError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let records = rdr
        .deserialize::<TradeRecord>()
        .enumerate()
        .map(|(i, row)| row.map_err(|e| invalid_trades(format!("row {}: {e}", i + 1))))
        .collect::<Result<Vec<_>, _>>()?;
    validate_trades(records)
}

fn validate_trades(records: Vec<TradeRecord>) -> Result<TradeTable, CoreError> {
    if let Some(i) = records.iter().position(|r| r.symbol.trim().is_empty()) {
        return Err(invalid_trades(format!("row {} has an empty Symbol", i + 1)));
    }
    Ok(TradeTable::new(records))
}

fn invalid_trades(message: String) -> CoreError {
    CoreError::InvalidDataset {
        name: DatasetKind::Trades.to_string(),
        message,
    }
}

fn dataset_path(dir: &Path, kind: DatasetKind, ext: &str) -> PathBuf {
    dir.join(format!("{}.{ext}", kind.file_stem()))
}

fn read_dataset(dir: &Path, kind: DatasetKind, ext: &str) -> Result<String, CoreError> {
    let path = dataset_path(dir, kind, ext);
    if !path.is_file() {
        return Err(CoreError::DatasetMissing {
            name: kind.to_string(),
            location: dir.display().to_string(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

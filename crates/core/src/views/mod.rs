pub mod registry;
pub mod traits;

// Page implementations
pub mod daily_value;
pub mod news;
pub mod overview;
pub mod stock_charts;
pub mod upload;
pub mod xirr;

use chrono::NaiveDate;

use crate::models::chart::Bar;
use crate::models::table::SeriesPoint;
use crate::models::view::TableWidget;

/// Two-decimal formatting used for every money and quantity cell.
pub(crate) fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

pub(crate) fn table(columns: &[&str], rows: Vec<Vec<String>>) -> TableWidget {
    TableWidget {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows,
    }
}

/// Month-end points as bars labelled by date.
pub(crate) fn dated_bars(points: &[SeriesPoint]) -> Vec<Bar> {
    points
        .iter()
        .map(|p| Bar {
            label: date_label(p.date),
            value: p.value,
        })
        .collect()
}

pub(crate) fn date_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

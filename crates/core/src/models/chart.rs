use serde::{Deserialize, Serialize};

use super::table::SeriesPoint;

/// A labelled bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Bar chart data for the frontend.
///
/// The core computes the numbers; the frontend decides how to draw them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    /// Optional chart title
    pub title: Option<String>,

    /// Label of the value axis (e.g., "XIRR (%)")
    pub value_label: String,

    /// Bars in display order
    pub bars: Vec<Bar>,

    /// Draw a reference line at zero
    pub zero_baseline: bool,
}

impl BarChart {
    pub fn new(value_label: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            title: None,
            value_label: value_label.into(),
            bars,
            zero_baseline: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_zero_baseline(mut self) -> Self {
        self.zero_baseline = true;
        self
    }
}

/// Time-series line chart data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    /// Name of the plotted series (e.g., "Total Value")
    pub series_label: String,

    /// Points in ascending date order
    pub points: Vec<SeriesPoint>,
}

impl LineChart {
    pub fn new(series_label: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        Self {
            series_label: series_label.into(),
            points,
        }
    }
}

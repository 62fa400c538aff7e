use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::chart::{BarChart, LineChart};
use super::news::Article;
use super::upload::UploadedFile;

/// The six dashboard pages, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViewId {
    PortfolioOverview,
    XirrAnalysis,
    DailyPortfolioValue,
    IndividualStockCharts,
    UploadNewData,
    LatestNews,
}

impl ViewId {
    pub const ALL: [ViewId; 6] = [
        ViewId::PortfolioOverview,
        ViewId::XirrAnalysis,
        ViewId::DailyPortfolioValue,
        ViewId::IndividualStockCharts,
        ViewId::UploadNewData,
        ViewId::LatestNews,
    ];

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            ViewId::PortfolioOverview => "Portfolio Overview",
            ViewId::XirrAnalysis => "XIRR Analysis",
            ViewId::DailyPortfolioValue => "Daily Portfolio Value",
            ViewId::IndividualStockCharts => "Individual Stock Charts",
            ViewId::UploadNewData => "Upload New Data",
            ViewId::LatestNews => "Latest News",
        }
    }

    /// Short machine name, used on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            ViewId::PortfolioOverview => "overview",
            ViewId::XirrAnalysis => "xirr",
            ViewId::DailyPortfolioValue => "daily-value",
            ViewId::IndividualStockCharts => "stock",
            ViewId::UploadNewData => "upload",
            ViewId::LatestNews => "news",
        }
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ViewId {
    type Err = CoreError;

    /// Accepts either the slug or the menu label (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ViewId::ALL
            .into_iter()
            .find(|v| v.slug() == needle || v.label().to_ascii_lowercase() == needle)
            .ok_or_else(|| CoreError::ValidationError(format!("unknown view '{s}'")))
    }
}

/// Transient user selections for a single render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewRequest {
    /// Symbol picked in the XIRR or stock-chart selector
    pub symbol: Option<String>,

    /// Files handed to the upload page
    pub uploads: Vec<UploadedFile>,
}

impl ViewRequest {
    pub fn with_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            uploads: Vec::new(),
        }
    }

    pub fn with_uploads(uploads: Vec<UploadedFile>) -> Self {
        Self {
            symbol: None,
            uploads,
        }
    }
}

/// A plain table: header row plus pre-formatted cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableWidget {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One renderable element of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Widget {
    Subheader(String),
    Table(TableWidget),
    BarChart(BarChart),
    LineChart(LineChart),
    Metric { label: String, value: String },
    Info(String),
    Success(String),
    Warning(String),
    Article(Article),
    Divider,
}

/// A fully computed page, ready for any frontend to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedView {
    pub view: ViewId,
    pub title: String,
    pub widgets: Vec<Widget>,
}

impl RenderedView {
    pub fn new(view: ViewId, title: impl Into<String>) -> Self {
        Self {
            view,
            title: title.into(),
            widgets: Vec::new(),
        }
    }

    pub fn push(&mut self, widget: Widget) {
        self.widgets.push(widget);
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.widgets.iter().filter_map(|w| match w {
            Widget::Warning(msg) => Some(msg.as_str()),
            _ => None,
        })
    }
}

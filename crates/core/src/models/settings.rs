use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::analytics::GapPolicy;
use super::xirr::XirrDisplayMode;

/// Runtime configuration for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Directory holding the five persisted datasets.
    pub data_dir: PathBuf,

    /// Percent-scaled or fractional XIRR display.
    pub xirr_display: XirrDisplayMode,

    /// Gap handling for the monthly activity charts.
    pub gap_policy: GapPolicy,

    /// Rows shown in preview tables (trades head, uploaded files).
    pub preview_rows: usize,

    pub news: NewsSettings,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            xirr_display: XirrDisplayMode::default(),
            gap_policy: GapPolicy::default(),
            preview_rows: 5,
            news: NewsSettings::default(),
        }
    }
}

/// News feed configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct NewsSettings {
    /// NewsAPI key; absent disables the feed (with a warning).
    pub api_key: Option<String>,
    pub query: String,
    pub language: String,
    /// Maximum number of articles shown
    pub limit: usize,
    pub timeout_secs: u64,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            query: "stocks OR investing OR equities".to_string(),
            language: "en".to_string(),
            limit: 5,
            timeout_secs: 30,
        }
    }
}

// Hand-written so the API key never ends up in logs.
impl std::fmt::Debug for NewsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("query", &self.query)
            .field("language", &self.language)
            .field("limit", &self.limit)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

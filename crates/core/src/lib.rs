pub mod context;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;
pub mod views;

use std::path::Path;

use log::debug;

use context::DashboardContext;
use errors::CoreError;
use models::{
    analytics::{MonthlyActivity, SnapshotSummary, SymbolVolume},
    dataset::DatasetBundle,
    settings::DashboardSettings,
    view::{RenderedView, ViewId, ViewRequest},
    xirr::XirrTable,
};
use services::{metrics_service::MetricsService, news_service::NewsService};
use storage::{loader::DatasetLoader, manager::StorageManager};
use views::registry::ViewRouter;

/// Main entry point for the portfolio dashboard core library.
/// Holds the loaded datasets and the page router.
#[must_use]
pub struct PortfolioDashboard {
    context: DashboardContext,
    router: ViewRouter,
    metrics: MetricsService,
}

impl std::fmt::Debug for PortfolioDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.context.datasets();
        f.debug_struct("PortfolioDashboard")
            .field("trades", &data.trades.len())
            .field("price_rows", &data.prices.len())
            .field("holdings_rows", &data.holdings.len())
            .field("valuation_rows", &data.daily_value.table().len())
            .field("xirr_entries", &data.xirr.len())
            .field("views", &self.router.menu())
            .finish()
    }
}

impl PortfolioDashboard {
    /// Load the datasets from `settings.data_dir` (a directory or a
    /// `.pfdb` bundle) and wire the default pages.
    pub fn load(settings: DashboardSettings) -> Result<Self, CoreError> {
        let datasets = DatasetLoader::load(&settings.data_dir)?;
        debug!("dashboard settings: {settings:?}");
        let news = NewsService::from_settings(&settings.news);
        Ok(Self::build(datasets, settings, news))
    }

    /// Build from already-loaded datasets with the default pages.
    pub fn from_datasets(datasets: DatasetBundle, settings: DashboardSettings) -> Self {
        let news = NewsService::from_settings(&settings.news);
        Self::build(datasets, settings, news)
    }

    /// Build with a specific news source (alternate backends, tests).
    pub fn with_news_service(
        datasets: DatasetBundle,
        settings: DashboardSettings,
        news: NewsService,
    ) -> Self {
        Self::build(datasets, settings, news)
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Render one page.
    pub async fn render(
        &self,
        view: ViewId,
        request: &ViewRequest,
    ) -> Result<RenderedView, CoreError> {
        self.router.render(view, &self.context, request).await
    }

    /// Pages available in the menu, in order.
    #[must_use]
    pub fn menu(&self) -> Vec<ViewId> {
        self.router.menu()
    }

    #[must_use]
    pub fn context(&self) -> &DashboardContext {
        &self.context
    }

    // ── Derived Metrics ─────────────────────────────────────────────

    #[must_use]
    pub fn trade_volume(&self) -> Vec<SymbolVolume> {
        self.metrics
            .trade_volume_by_symbol(&self.context.datasets().trades)
    }

    #[must_use]
    pub fn xirr_table(&self) -> XirrTable {
        self.metrics.xirr_table(
            &self.context.datasets().xirr,
            self.context.settings().xirr_display,
        )
    }

    #[must_use]
    pub fn monthly_activity(&self, symbol: &str) -> MonthlyActivity {
        self.metrics.monthly_activity(
            &self.context.datasets().trades,
            symbol,
            self.context.settings().gap_policy,
        )
    }

    pub fn snapshot_summary(&self) -> Result<SnapshotSummary, CoreError> {
        let data = self.context.datasets();
        self.metrics
            .snapshot_summary(&data.daily_value, &data.holdings)
    }

    /// Symbols with at least one trade, sorted.
    #[must_use]
    pub fn symbols(&self) -> Vec<String> {
        self.context.datasets().trades.symbols()
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Pack the loaded datasets into a single `.pfdb` bundle.
    pub fn save_bundle(&self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        StorageManager::save_to_file(self.context.datasets(), path)
    }

    /// Serialize one rendered page as JSON (for non-terminal frontends).
    pub fn view_to_json(view: &RenderedView) -> Result<String, CoreError> {
        serde_json::to_string_pretty(view)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize view: {e}")))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(datasets: DatasetBundle, settings: DashboardSettings, news: NewsService) -> Self {
        Self {
            context: DashboardContext::new(datasets, settings),
            router: ViewRouter::new_with_defaults(news),
            metrics: MetricsService::new(),
        }
    }
}

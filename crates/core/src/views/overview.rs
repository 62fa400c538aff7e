use async_trait::async_trait;

use crate::context::DashboardContext;
use crate::errors::CoreError;
use crate::models::chart::{Bar, BarChart};
use crate::models::view::{RenderedView, ViewId, ViewRequest, Widget};
use crate::services::metrics_service::MetricsService;

use super::traits::View;
use super::{format_amount, table};

/// Headline metrics, the first trades, traded volume and open positions.
pub struct OverviewView {
    metrics: MetricsService,
}

impl OverviewView {
    pub fn new() -> Self {
        Self {
            metrics: MetricsService::new(),
        }
    }
}

impl Default for OverviewView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl View for OverviewView {
    fn id(&self) -> ViewId {
        ViewId::PortfolioOverview
    }

    async fn render(
        &self,
        ctx: &DashboardContext,
        _request: &ViewRequest,
    ) -> Result<RenderedView, CoreError> {
        let data = ctx.datasets();
        let mut page = RenderedView::new(self.id(), "📈 Portfolio Overview");

        match self.metrics.snapshot_summary(&data.daily_value, &data.holdings) {
            Ok(summary) => {
                page.push(Widget::Metric {
                    label: format!("Current Total Value ({})", summary.as_of),
                    value: format_amount(summary.current_total_value),
                });
                page.push(Widget::Metric {
                    label: format!("Active Holdings ({})", summary.holdings_as_of),
                    value: summary.active_holdings.to_string(),
                });
            }
            Err(CoreError::EmptyDataset(name)) => {
                page.push(Widget::Info(format!("No snapshot available: {name} is empty.")));
            }
            Err(e) => return Err(e),
        }

        page.push(Widget::Subheader("Recent Trades".into()));
        let rows = data
            .trades
            .head(ctx.settings().preview_rows)
            .iter()
            .map(|r| {
                vec![
                    r.symbol.clone(),
                    format_amount(r.quantity),
                    format_amount(r.proceeds),
                    r.date_time.format("%Y-%m-%d %H:%M:%S").to_string(),
                ]
            })
            .collect();
        page.push(Widget::Table(table(
            &["Symbol", "Quantity", "Proceeds", "Date/Time"],
            rows,
        )));

        page.push(Widget::Subheader("Trade Volume by Symbol".into()));
        let volume = self.metrics.trade_volume_by_symbol(&data.trades);
        if volume.is_empty() {
            page.push(Widget::Info("No trades loaded.".into()));
        } else {
            let bars = volume
                .into_iter()
                .map(|v| Bar {
                    label: v.symbol,
                    value: v.quantity,
                })
                .collect();
            page.push(Widget::BarChart(BarChart::new("Quantity", bars)));
        }

        let positions = self.metrics.active_positions(&data.holdings);
        if !positions.is_empty() {
            page.push(Widget::Subheader("Current Holdings".into()));
            let rows = positions
                .into_iter()
                .map(|p| vec![p.symbol, format_amount(p.quantity)])
                .collect();
            page.push(Widget::Table(table(&["Symbol", "Quantity"], rows)));
        }

        Ok(page)
    }
}

use async_trait::async_trait;

use crate::context::DashboardContext;
use crate::errors::CoreError;
use crate::models::chart::{BarChart, LineChart};
use crate::models::view::{RenderedView, ViewId, ViewRequest, Widget};
use crate::services::metrics_service::MetricsService;

use super::dated_bars;
use super::traits::View;

/// Monthly traded quantity and proceeds for one symbol, plus its price line.
pub struct StockChartsView {
    metrics: MetricsService,
}

impl StockChartsView {
    pub fn new() -> Self {
        Self {
            metrics: MetricsService::new(),
        }
    }
}

impl Default for StockChartsView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl View for StockChartsView {
    fn id(&self) -> ViewId {
        ViewId::IndividualStockCharts
    }

    async fn render(
        &self,
        ctx: &DashboardContext,
        request: &ViewRequest,
    ) -> Result<RenderedView, CoreError> {
        let data = ctx.datasets();
        let mut page = RenderedView::new(self.id(), "📉 Individual Stock Activity");

        let symbols = data.trades.symbols();
        // Default selection is the first symbol alphabetically
        let Some(stock) = request.symbol.clone().or_else(|| symbols.first().cloned()) else {
            page.push(Widget::Info("No trades loaded.".into()));
            return Ok(page);
        };
        if !data.trades.contains_symbol(&stock) {
            page.push(Widget::Warning(format!(
                "No trades for {stock}. Available: {}",
                symbols.join(", ")
            )));
            return Ok(page);
        }

        let activity = self
            .metrics
            .monthly_activity(&data.trades, &stock, ctx.settings().gap_policy);

        page.push(Widget::Subheader(format!("Quantity Traded: {stock}")));
        page.push(Widget::BarChart(BarChart::new(
            "Quantity",
            dated_bars(&activity.quantity_series()),
        )));

        page.push(Widget::Subheader(format!("Proceeds: {stock}")));
        page.push(Widget::BarChart(
            BarChart::new("Proceeds", dated_bars(&activity.proceeds_series())).with_zero_baseline(),
        ));

        let prices = self.metrics.price_history(&data.prices, &stock);
        if !prices.is_empty() {
            page.push(Widget::Subheader(format!("Price History: {stock}")));
            page.push(Widget::LineChart(LineChart::new(stock.as_str(), prices)));
        }

        Ok(page)
    }
}

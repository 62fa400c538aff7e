use async_trait::async_trait;

use crate::context::DashboardContext;
use crate::errors::CoreError;
use crate::models::chart::{Bar, BarChart};
use crate::models::view::{RenderedView, ViewId, ViewRequest, Widget};
use crate::services::metrics_service::MetricsService;

use super::table;
use super::traits::View;

/// XIRR table, comparison chart and the selected symbol's figure.
pub struct XirrView {
    metrics: MetricsService,
}

impl XirrView {
    pub fn new() -> Self {
        Self {
            metrics: MetricsService::new(),
        }
    }
}

impl Default for XirrView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl View for XirrView {
    fn id(&self) -> ViewId {
        ViewId::XirrAnalysis
    }

    async fn render(
        &self,
        ctx: &DashboardContext,
        request: &ViewRequest,
    ) -> Result<RenderedView, CoreError> {
        let mut page = RenderedView::new(self.id(), "📊 XIRR by Stock");
        let xirr = self
            .metrics
            .xirr_table(&ctx.datasets().xirr, ctx.settings().xirr_display);

        if xirr.is_empty() {
            page.push(Widget::Info("No valid XIRR results to display.".into()));
            return Ok(page);
        }

        let rows = xirr
            .rows
            .iter()
            .map(|r| vec![r.symbol.clone(), xirr.format_value(r.value)])
            .collect();
        page.push(Widget::Table(table(&["Symbol", xirr.value_header()], rows)));

        page.push(Widget::Subheader("XIRR Comparison".into()));
        let bars = xirr
            .rows
            .iter()
            .map(|r| Bar {
                label: r.symbol.clone(),
                value: r.value,
            })
            .collect();
        page.push(Widget::BarChart(
            BarChart::new(xirr.value_header(), bars)
                .with_title("Annualized Return (XIRR) by Holding")
                .with_zero_baseline(),
        ));

        // Default selection is the top entry
        let selected = request
            .symbol
            .as_deref()
            .or_else(|| xirr.symbols().next())
            .unwrap_or_default();
        match xirr.get(selected) {
            Some(value) => page.push(Widget::Metric {
                label: format!("XIRR for {selected}"),
                value: xirr.format_value(value),
            }),
            None => page.push(Widget::Warning(format!(
                "No valid XIRR result for {selected}."
            ))),
        }

        Ok(page)
    }
}

use async_trait::async_trait;

use crate::context::DashboardContext;
use crate::errors::CoreError;
use crate::models::chart::LineChart;
use crate::models::valuation::TOTAL_VALUE_COLUMN;
use crate::models::view::{RenderedView, ViewId, ViewRequest, Widget};

use super::format_amount;
use super::traits::View;

/// Line chart of the daily `Total Value`.
pub struct DailyValueView;

impl DailyValueView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DailyValueView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl View for DailyValueView {
    fn id(&self) -> ViewId {
        ViewId::DailyPortfolioValue
    }

    async fn render(
        &self,
        ctx: &DashboardContext,
        _request: &ViewRequest,
    ) -> Result<RenderedView, CoreError> {
        let mut page = RenderedView::new(self.id(), "📅 Daily Portfolio Value");
        let points = ctx.datasets().daily_value.total_value_series();

        let Some(latest) = points.last().copied() else {
            page.push(Widget::Info("No daily valuation data loaded.".into()));
            return Ok(page);
        };

        page.push(Widget::Metric {
            label: format!("{TOTAL_VALUE_COLUMN} ({})", latest.date),
            value: format_amount(latest.value),
        });
        page.push(Widget::LineChart(LineChart::new(TOTAL_VALUE_COLUMN, points)));
        Ok(page)
    }
}

use std::collections::BTreeMap;

use log::debug;

use crate::context::DashboardContext;
use crate::errors::CoreError;
use crate::models::view::{RenderedView, ViewId, ViewRequest};
use crate::services::news_service::NewsService;

use super::daily_value::DailyValueView;
use super::news::NewsView;
use super::overview::OverviewView;
use super::stock_charts::StockChartsView;
use super::traits::View;
use super::upload::UploadView;
use super::xirr::XirrView;

/// Routes a menu selection to the page that renders it.
pub struct ViewRouter {
    views: BTreeMap<ViewId, Box<dyn View>>,
}

impl ViewRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        Self {
            views: BTreeMap::new(),
        }
    }

    /// Create a router with all six pages registered.
    pub fn new_with_defaults(news: NewsService) -> Self {
        let mut router = Self::new();
        router.register(Box::new(OverviewView::new()));
        router.register(Box::new(XirrView::new()));
        router.register(Box::new(DailyValueView::new()));
        router.register(Box::new(StockChartsView::new()));
        router.register(Box::new(UploadView::new()));
        router.register(Box::new(NewsView::new(news)));
        router
    }

    /// Register a page, replacing any page already serving the same id.
    pub fn register(&mut self, view: Box<dyn View>) {
        self.views.insert(view.id(), view);
    }

    /// Registered pages in `ViewId::ALL` order.
    pub fn menu(&self) -> Vec<ViewId> {
        ViewId::ALL
            .into_iter()
            .filter(|id| self.views.contains_key(id))
            .collect()
    }

    pub async fn render(
        &self,
        id: ViewId,
        ctx: &DashboardContext,
        request: &ViewRequest,
    ) -> Result<RenderedView, CoreError> {
        let view = self
            .views
            .get(&id)
            .ok_or_else(|| CoreError::ValidationError(format!("no page registered for '{id}'")))?;
        debug!("rendering {id}");
        view.render(ctx, request).await
    }
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

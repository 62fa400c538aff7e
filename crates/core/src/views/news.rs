use async_trait::async_trait;

use crate::context::DashboardContext;
use crate::errors::CoreError;
use crate::models::view::{RenderedView, ViewId, ViewRequest, Widget};
use crate::services::news_service::NewsService;

use super::traits::View;

/// Latest market headlines. A failed fetch becomes a warning on the page.
pub struct NewsView {
    news: NewsService,
}

impl NewsView {
    pub fn new(news: NewsService) -> Self {
        Self { news }
    }
}

#[async_trait]
impl View for NewsView {
    fn id(&self) -> ViewId {
        ViewId::LatestNews
    }

    async fn render(
        &self,
        _ctx: &DashboardContext,
        _request: &ViewRequest,
    ) -> Result<RenderedView, CoreError> {
        let mut page = RenderedView::new(self.id(), "📰 Latest Stock Market News");

        match self.news.fetch_latest().await {
            Ok(articles) if articles.is_empty() => {
                page.push(Widget::Info("No articles found.".into()));
            }
            Ok(articles) => {
                for article in articles {
                    page.push(Widget::Article(article));
                    page.push(Widget::Divider);
                }
            }
            Err(failure) => page.push(Widget::Warning(failure.user_message())),
        }

        Ok(page)
    }
}

use log::{debug, warn};

use crate::models::news::{Article, NewsFailure};
use crate::models::settings::NewsSettings;
use crate::providers::newsapi::NewsApiProvider;
use crate::providers::traits::NewsProvider;

/// Fetches the news feed and turns every failure into a typed outcome.
/// Never panics, never retries.
pub struct NewsService {
    provider: Option<Box<dyn NewsProvider>>,
    limit: usize,
}

impl NewsService {
    /// NewsAPI when a non-empty key is configured, otherwise no provider.
    pub fn from_settings(settings: &NewsSettings) -> Self {
        let provider = settings
            .api_key
            .as_ref()
            .filter(|key| !key.trim().is_empty())
            .map(|key| Box::new(NewsApiProvider::new(key.clone(), settings)) as Box<dyn NewsProvider>);
        Self {
            provider,
            limit: settings.limit,
        }
    }

    pub fn with_provider(provider: Box<dyn NewsProvider>, limit: usize) -> Self {
        Self {
            provider: Some(provider),
            limit,
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Latest articles, at most `limit`.
    pub async fn fetch_latest(&self) -> Result<Vec<Article>, NewsFailure> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| NewsFailure::Auth("NEWSAPI_KEY is not set".to_string()))?;

        match provider.latest_articles(self.limit).await {
            Ok(articles) => {
                debug!("{} returned {} articles", provider.name(), articles.len());
                Ok(articles.into_iter().take(self.limit).collect())
            }
            Err(failure) => {
                warn!("{} news fetch failed: {failure}", provider.name());
                Err(failure)
            }
        }
    }
}

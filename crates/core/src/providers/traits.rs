use async_trait::async_trait;

use crate::models::news::{Article, NewsFailure};

/// Source of market news headlines.
///
/// The dashboard only needs "latest N articles"; each backend maps its
/// own failures onto the closed [`NewsFailure`] set.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Human-readable name of this provider (for logs).
    fn name(&self) -> &str;

    /// Most recent articles first, at most `limit` of them.
    async fn latest_articles(&self, limit: usize) -> Result<Vec<Article>, NewsFailure>;
}

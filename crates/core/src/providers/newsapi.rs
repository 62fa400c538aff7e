use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::redact_query;
use crate::models::news::{Article, NewsFailure};
use crate::models::settings::NewsSettings;

use super::traits::NewsProvider;

const BASE_URL: &str = "https://newsapi.org/v2/everything";

/// NewsAPI.org "everything" search.
///
/// - **Requires**: API key (`NEWSAPI_KEY`).
/// - **Query**: configured keywords, one language, newest first.
pub struct NewsApiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    query: String,
    language: String,
}

impl NewsApiProvider {
    pub fn new(api_key: String, settings: &NewsSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: BASE_URL.to_string(),
            api_key,
            query: settings.query.clone(),
            language: settings.language.clone(),
        }
    }

    /// Point the provider at another endpoint (self-hosted proxy, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

// ── NewsAPI response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct EverythingResponse {
    status: Option<String>,
    code: Option<String>,
    message: Option<String>,
    articles: Option<Vec<RawArticle>>,
}

#[derive(Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn latest_articles(&self, limit: usize) -> Result<Vec<Article>, NewsFailure> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", self.query.as_str()),
                ("language", self.language.as_str()),
                ("sortBy", "publishedAt"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| NewsFailure::Network(redact_query(&e.to_string())))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| NewsFailure::Network(redact_query(&e.to_string())))?;

        parse_response(status, &body, limit)
    }
}

/// Classify a NewsAPI reply and pull out the first `limit` articles.
///
/// - 401/403, or an error body whose code starts with `apiKey`/`rateLimited` → `Auth`
/// - any other non-2xx status → `Network`
/// - a 2xx body that is not the expected JSON shape → `MalformedResponse`
pub fn parse_response(status: u16, body: &str, limit: usize) -> Result<Vec<Article>, NewsFailure> {
    let parsed: Result<EverythingResponse, _> = serde_json::from_str(body);

    if !(200..300).contains(&status) {
        let (code, message) = match &parsed {
            Ok(r) => (r.code.clone(), r.message.clone()),
            Err(_) => (None, None),
        };
        if status == 401 || status == 403 || code.as_deref().is_some_and(is_auth_code) {
            return Err(NewsFailure::Auth(
                message.unwrap_or_else(|| format!("HTTP {status}")),
            ));
        }
        return Err(NewsFailure::Network(match message {
            Some(message) => format!("HTTP {status}: {message}"),
            None => format!("HTTP {status}"),
        }));
    }

    let resp = parsed.map_err(|e| NewsFailure::MalformedResponse(e.to_string()))?;

    if resp.status.as_deref() == Some("error") {
        let detail = resp
            .message
            .unwrap_or_else(|| "news service reported an error".to_string());
        return match resp.code.as_deref() {
            Some(code) if is_auth_code(code) => Err(NewsFailure::Auth(detail)),
            _ => Err(NewsFailure::MalformedResponse(detail)),
        };
    }

    let articles = resp
        .articles
        .ok_or_else(|| NewsFailure::MalformedResponse("missing 'articles' list".to_string()))?;

    Ok(articles
        .into_iter()
        .take(limit)
        .map(|a| Article {
            title: a.title.unwrap_or_default(),
            description: a.description,
            url: a.url.unwrap_or_default(),
        })
        .collect())
}

fn is_auth_code(code: &str) -> bool {
    code.starts_with("apiKey") || code == "rateLimited"
}

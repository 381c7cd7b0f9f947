//! NewsAPI search client.
//!
//! Queries the [`/v2/everything`](https://newsapi.org/docs/endpoints/everything)
//! endpoint for English articles published in the last 24 hours, newest first.

use crate::config::Config;
use crate::error::ServiceError;
use crate::models::ArticleRecord;
use crate::utils::truncate_for_log;
use chrono::{Duration, Local};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Largest `pageSize` NewsAPI accepts; larger values are rejected with HTTP 400.
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    source: Option<RawSource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSource {
    name: Option<String>,
}

impl From<RawArticle> for ArticleRecord {
    fn from(raw: RawArticle) -> Self {
        ArticleRecord {
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            source_name: raw.source.and_then(|s| s.name).unwrap_or_default(),
        }
    }
}

/// Search for articles matching `query` from the last 24 hours.
///
/// Returns at most `max_results` records, newest first. Every article in the
/// provider's response becomes exactly one record.
///
/// Transport errors are stripped of the request URL, which carries the API key.
#[instrument(level = "info", skip(client, config))]
pub async fn search_news(
    client: &Client,
    config: &Config,
    query: &str,
    max_results: usize,
) -> Result<Vec<ArticleRecord>, ServiceError> {
    let now = Local::now();
    let from = (now - Duration::hours(24)).format("%Y-%m-%d").to_string();
    let to = now.format("%Y-%m-%d").to_string();
    let page_size = max_results.min(MAX_PAGE_SIZE).to_string();

    let response = client
        .get(config.news_api_url.clone())
        .query(&[
            ("q", query),
            ("apiKey", config.news_api_key.as_str()),
            ("language", "en"),
            ("sortBy", "publishedAt"),
            ("pageSize", page_size.as_str()),
            ("from", from.as_str()),
            ("to", to.as_str()),
        ])
        .send()
        .await
        .map_err(|e| ServiceError::Transport(e.without_url()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::Status {
            status: status.as_u16(),
            body: truncate_for_log(&body, 300),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| ServiceError::Transport(e.without_url()))?;
    let parsed: EverythingResponse = serde_json::from_str(&body)?;
    debug!(returned = parsed.articles.len(), %from, %to, "NewsAPI response parsed");

    Ok(parsed
        .articles
        .into_iter()
        .take(max_results)
        .map(ArticleRecord::from)
        .collect())
}

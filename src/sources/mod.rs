//! News collection across all configured categories.
//!
//! Each category is searched once, one after another. A failed search is
//! recorded as [`SearchOutcome::Failed`] and logged; it never aborts the
//! run, so one bad category still leaves the others in the briefing.
//!
//! # Providers
//!
//! | Provider | Module | Notes |
//! |----------|--------|-------|
//! | NewsAPI | [`newsapi`] | `/v2/everything`, English, sorted by `publishedAt` |

pub mod newsapi;

use crate::config::Config;
use crate::models::{CategorizedResults, SearchOutcome};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{error, info, instrument};

/// Search every configured category, in declaration order.
#[instrument(level = "info", skip_all, fields(categories = config.queries.len()))]
pub async fn collect_all(client: &Client, config: &Config) -> CategorizedResults {
    let results: CategorizedResults = stream::iter(config.queries.iter())
        .then(|q| async move {
            info!(category = %q.category, "Searching category");
            let outcome = match newsapi::search_news(client, config, &q.query, config.max_results).await {
                Ok(articles) => {
                    info!(category = %q.category, count = articles.len(), "Found articles");
                    SearchOutcome::Found(articles)
                }
                Err(e) => {
                    error!(category = %q.category, error = %e, "Search failed; continuing without category");
                    SearchOutcome::Failed(e.to_string())
                }
            };
            (q.category.clone(), outcome)
        })
        .collect()
        .await;

    info!(
        articles = results.article_count(),
        failed = results.failed_count(),
        "News collection complete"
    );
    results
}

//! Data models for search queries, collected articles, and the outgoing email.
//!
//! This module defines the values that flow between pipeline stages:
//! - [`SearchQuery`]: one topic category and its search string
//! - [`ArticleRecord`]: a normalized search result
//! - [`SearchOutcome`] / [`CategorizedResults`]: the collector's output
//! - [`EmailEnvelope`]: the dispatcher's input
//!
//! Nothing here outlives a single run.

use serde::{Deserialize, Serialize};

/// A topic category and the free-text query used to search for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchQuery {
    /// Category identifier, e.g. `supply_chain`.
    pub category: String,
    /// Query string sent to the search provider.
    pub query: String,
}

impl SearchQuery {
    pub fn new(category: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            query: query.into(),
        }
    }
}

/// The built-in query set, in the order their sections appear in the briefing.
pub fn default_queries() -> Vec<SearchQuery> {
    vec![
        SearchQuery::new("companies", "TSMC NVIDIA Intel Samsung AMD ASML semiconductor"),
        SearchQuery::new("policy", "semiconductor CHIPS Act export controls trade"),
        SearchQuery::new(
            "supply_chain",
            "chip shortage semiconductor supply chain manufacturing",
        ),
    ]
}

/// A single search result, normalized so every field is present.
///
/// Fields the provider omitted (or sent as `null`) are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleRecord {
    pub title: String,
    pub description: String,
    pub url: String,
    pub source_name: String,
}

/// Result of searching one category.
///
/// A failed search keeps its reason so it stays visible in logs and tests,
/// but contributes no articles downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Vec<ArticleRecord>),
    Failed(String),
}

impl SearchOutcome {
    /// Articles for this category; empty when the search failed.
    pub fn articles(&self) -> &[ArticleRecord] {
        match self {
            SearchOutcome::Found(articles) => articles,
            SearchOutcome::Failed(_) => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SearchOutcome::Failed(_))
    }
}

/// Search outcomes keyed by category, in query declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedResults {
    entries: Vec<(String, SearchOutcome)>,
}

impl CategorizedResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category's outcome. Order of insertion is order of iteration.
    pub fn push(&mut self, category: impl Into<String>, outcome: SearchOutcome) {
        self.entries.push((category.into(), outcome));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SearchOutcome)> {
        self.entries
            .iter()
            .map(|(category, outcome)| (category.as_str(), outcome))
    }

    /// Total number of articles across all categories.
    pub fn article_count(&self) -> usize {
        self.entries.iter().map(|(_, o)| o.articles().len()).sum()
    }

    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_failed()).count()
    }
}

impl Extend<(String, SearchOutcome)> for CategorizedResults {
    fn extend<I: IntoIterator<Item = (String, SearchOutcome)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl FromIterator<(String, SearchOutcome)> for CategorizedResults {
    fn from_iter<I: IntoIterator<Item = (String, SearchOutcome)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A fully rendered email, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailEnvelope {
    pub subject: String,
    pub plain_body: String,
    pub html_body: String,
    pub sender: String,
    pub recipient: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_queries_order() {
        let categories: Vec<String> = default_queries().into_iter().map(|q| q.category).collect();
        assert_eq!(categories, vec!["companies", "policy", "supply_chain"]);
    }

    #[test]
    fn test_failed_outcome_has_no_articles() {
        let outcome = SearchOutcome::Failed("HTTP 500".to_string());
        assert!(outcome.articles().is_empty());
        assert!(outcome.is_failed());
    }

    #[test]
    fn test_categorized_results_preserve_insertion_order() {
        let mut results = CategorizedResults::new();
        results.push("zeta", SearchOutcome::Found(vec![article("z")]));
        results.push("alpha", SearchOutcome::Failed("timeout".to_string()));
        results.push("mid", SearchOutcome::Found(vec![article("m1"), article("m2")]));

        let order: Vec<&str> = results.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec!["zeta", "alpha", "mid"]);
        assert_eq!(results.article_count(), 3);
        assert_eq!(results.failed_count(), 1);
    }

    #[test]
    fn test_search_query_yaml_roundtrip_shape() {
        let yaml = "- category: memory\n  query: DRAM HBM prices\n";
        let queries: Vec<SearchQuery> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(queries, vec![SearchQuery::new("memory", "DRAM HBM prices")]);
    }
}

//! Validated run configuration.
//!
//! [`Config`] is built once at startup from the parsed [`Cli`] and then
//! passed by reference into every stage. All required settings are checked
//! up front so a missing secret is reported before any network call.

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::models::{SearchQuery, default_queries};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Everything a single run needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub news_api_key: String,
    pub generation_api_key: String,
    pub sender_email: String,
    pub sender_password: String,
    pub recipient_email: String,
    pub news_api_url: Url,
    pub generation_api_url: Url,
    pub model: String,
    pub max_tokens: u32,
    pub max_results: usize,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub request_timeout: Duration,
    /// Categories to search, in briefing order.
    pub queries: Vec<SearchQuery>,
}

impl Config {
    /// Validate CLI/environment input.
    ///
    /// Blank values count as missing, since CI runners export unset secrets
    /// as empty strings. All missing names are reported together.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let news_api_key = required(cli.news_api_key, "NEWS_API_KEY", &mut missing);
        let generation_api_key = required(cli.anthropic_api_key, "ANTHROPIC_API_KEY", &mut missing);
        let sender_email = required(cli.sender_email, "SENDER_EMAIL", &mut missing);
        let sender_password = required(cli.sender_password, "SENDER_PASSWORD", &mut missing);
        let recipient_email = required(cli.recipient_email, "RECIPIENT_EMAIL", &mut missing);
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        if cli.max_results == 0 {
            return Err(ConfigError::NotPositive("MAX_RESULTS"));
        }
        if cli.max_tokens == 0 {
            return Err(ConfigError::NotPositive("GENERATION_MAX_TOKENS"));
        }
        if cli.timeout_secs == 0 {
            return Err(ConfigError::NotPositive("REQUEST_TIMEOUT_SECS"));
        }

        let news_api_url = parse_url(&cli.news_api_url, "NEWS_API_URL")?;
        let generation_api_url = parse_url(&cli.generation_api_url, "GENERATION_API_URL")?;

        let queries = match cli.queries_file {
            Some(path) => load_queries(&path)?,
            None => default_queries(),
        };

        Ok(Self {
            news_api_key,
            generation_api_key,
            sender_email,
            sender_password,
            recipient_email,
            news_api_url,
            generation_api_url,
            model: cli.model,
            max_tokens: cli.max_tokens,
            max_results: cli.max_results,
            smtp_host: cli.smtp_host,
            smtp_port: cli.smtp_port,
            request_timeout: Duration::from_secs(cli.timeout_secs),
            queries,
        })
    }
}

fn required(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

fn parse_url(raw: &str, name: &'static str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { name, source })
}

/// Read an ordered YAML list of `{category, query}` entries.
pub fn load_queries(path: &Path) -> Result<Vec<SearchQuery>, ConfigError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::QueriesRead {
        path: display.clone(),
        source,
    })?;
    let queries: Vec<SearchQuery> = serde_yaml::from_str(&raw).map_err(|source| {
        ConfigError::QueriesParse {
            path: display,
            source,
        }
    })?;
    validate_queries(&queries)?;
    Ok(queries)
}

fn validate_queries(queries: &[SearchQuery]) -> Result<(), ConfigError> {
    if queries.is_empty() {
        return Err(ConfigError::InvalidQueries("no categories defined".to_string()));
    }
    for q in queries {
        if q.category.trim().is_empty() {
            return Err(ConfigError::InvalidQueries("empty category name".to_string()));
        }
        if q.query.trim().is_empty() {
            return Err(ConfigError::InvalidQueries(format!(
                "category {} has an empty query",
                q.category
            )));
        }
    }
    Ok(())
}

/// A complete config pointed at local mock servers.
#[cfg(test)]
pub fn test_config(news_api_url: &str, generation_api_url: &str) -> Config {
    Config {
        news_api_key: "news-key".to_string(),
        generation_api_key: "gen-key".to_string(),
        sender_email: "agent@example.com".to_string(),
        sender_password: "app-password".to_string(),
        recipient_email: "comms@example.com".to_string(),
        news_api_url: Url::parse(news_api_url).unwrap(),
        generation_api_url: Url::parse(generation_api_url).unwrap(),
        model: "claude-test".to_string(),
        max_tokens: 2000,
        max_results: 5,
        smtp_host: "127.0.0.1".to_string(),
        smtp_port: 1,
        request_timeout: Duration::from_secs(5),
        queries: default_queries(),
    }
}

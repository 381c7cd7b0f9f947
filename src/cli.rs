//! Command-line interface definitions for the semiconductor briefing agent.
//!
//! Every option is bound to an environment variable, so the scheduled job
//! runs with no arguments at all and reads its secrets from the environment.
//! Values are validated later by [`crate::config::Config::from_cli`].

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the briefing agent.
///
/// # Examples
///
/// ```sh
/// # Typical scheduled run: everything comes from the environment
/// semiconductor_brief
///
/// # Smaller briefing with a different model
/// semiconductor_brief --max-results 3 --model claude-3-5-haiku-20241022
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    /// Address the briefing is sent from (also the SMTP username)
    #[arg(long, env = "SENDER_EMAIL")]
    pub sender_email: Option<String>,

    /// SMTP password for the sender address
    #[arg(long, env = "SENDER_PASSWORD", hide_env_values = true)]
    pub sender_password: Option<String>,

    /// Address the briefing is delivered to
    #[arg(long, env = "RECIPIENT_EMAIL")]
    pub recipient_email: Option<String>,

    /// News search endpoint
    #[arg(long, env = "NEWS_API_URL", default_value = "https://newsapi.org/v2/everything")]
    pub news_api_url: String,

    /// Text generation endpoint
    #[arg(
        long,
        env = "GENERATION_API_URL",
        default_value = "https://api.anthropic.com/v1/messages"
    )]
    pub generation_api_url: String,

    /// Model identifier sent with the generation request
    #[arg(long, env = "GENERATION_MODEL", default_value = "claude-sonnet-4-20250514")]
    pub model: String,

    /// Upper bound on generated tokens
    #[arg(long, env = "GENERATION_MAX_TOKENS", default_value_t = 2000)]
    pub max_tokens: u32,

    /// Maximum articles kept per category
    #[arg(long, env = "MAX_RESULTS", default_value_t = 5)]
    pub max_results: usize,

    /// SMTP server (implicit TLS)
    #[arg(long, env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    /// SMTP port
    #[arg(long, env = "SMTP_PORT", default_value_t = 465)]
    pub smtp_port: u16,

    /// Timeout applied to every external call, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Optional YAML file replacing the built-in category queries
    #[arg(long, env = "BRIEFING_QUERIES_FILE")]
    pub queries_file: Option<PathBuf>,
}

//! # Semiconductor Brief
//!
//! A daily intelligence agent that gathers the last 24 hours of
//! semiconductor news, has an LLM condense it into a fixed five-section
//! briefing, and emails the result.
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... ANTHROPIC_API_KEY=... SENDER_EMAIL=... \
//! SENDER_PASSWORD=... RECIPIENT_EMAIL=... semiconductor_brief
//! ```
//!
//! ## Architecture
//!
//! 1. **Collection**: one NewsAPI search per category (failed categories are skipped)
//! 2. **Synthesis**: one Messages API call over all articles (failure becomes error text)
//! 3. **Dispatch**: one multipart email over SMTPS (failure prints the briefing and exits non-zero)

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod briefing;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod sources;
mod utils;

use cli::Cli;
use config::Config;
use outputs::email::SmtpMailer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // Logs go to stderr; stdout is reserved for the fallback briefing.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!(version = env!("CARGO_PKG_VERSION"), "semiconductor_brief starting up");

    let config = match Config::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration; nothing was fetched or sent");
            return Err(e.into());
        }
    };
    debug!(
        categories = config.queries.len(),
        model = %config.model,
        smtp_host = %config.smtp_host,
        "Configuration loaded"
    );

    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(config.request_timeout)
        .build()?;
    let mailer = SmtpMailer::new(&config);

    let mut stdout = std::io::stdout();
    let outcome = pipeline::run(&client, &config, &mailer, &mut stdout).await;

    let elapsed = start_time.elapsed();
    match outcome {
        Ok(()) => {
            info!(?elapsed, secs = elapsed.as_secs(), "Briefing delivered");
            Ok(())
        }
        Err(e) => {
            error!(?elapsed, error = %e, "Briefing was not delivered");
            Err(e.into())
        }
    }
}

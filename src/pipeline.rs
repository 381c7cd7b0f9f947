//! One end-to-end run: collect → synthesize → dispatch.
//!
//! Collection and synthesis always produce something. If dispatch fails,
//! the full briefing is written to `out` so the content is not lost, and
//! the dispatch error is returned for the caller to turn into a failing
//! exit status.

use crate::api::MessagesClient;
use crate::briefing::synthesize;
use crate::config::Config;
use crate::error::DispatchError;
use crate::models::EmailEnvelope;
use crate::outputs::email::Mailer;
use crate::outputs::html::subject_line;
use crate::sources::collect_all;
use crate::utils::long_date;
use chrono::Local;
use reqwest::Client;
use std::io::Write;
use tracing::{error, info, instrument, warn};

const RULE: &str = "======================================================================";

#[instrument(level = "info", skip_all)]
pub async fn run<M, W>(
    client: &Client,
    config: &Config,
    mailer: &M,
    out: &mut W,
) -> Result<(), DispatchError>
where
    M: Mailer,
    W: Write,
{
    info!("Step 1: gathering news");
    let results = collect_all(client, config).await;

    info!("Step 2: generating briefing");
    let briefing = synthesize(&MessagesClient::new(client, config), &results).await;

    info!("Step 3: sending email briefing");
    let date_label = long_date(&Local::now());
    let envelope = EmailEnvelope::compose(config, subject_line(&date_label), &briefing, &date_label);

    match mailer.send(&envelope).await {
        Ok(()) => {
            info!(recipient = %envelope.recipient, "Briefing sent");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Failed to send email; printing briefing instead");
            if let Err(io) = write_fallback(out, &briefing) {
                warn!(error = %io, "Failed to write fallback briefing");
            }
            Err(e)
        }
    }
}

fn write_fallback<W: Write>(out: &mut W, briefing: &str) -> std::io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Failed to send email. Briefing content:")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "{briefing}")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::models::SearchQuery;
    use crate::outputs::email::SmtpMailer;
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FIXED_BRIEFING: &str = "📊 EXECUTIVE SUMMARY\nFabs are busy.\n\n💡 COMMUNICATIONS IMPLICATIONS\nStay tuned.";

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<EmailEnvelope>>,
    }

    impl Mailer for RecordingMailer {
        async fn send(&self, envelope: &EmailEnvelope) -> Result<(), DispatchError> {
            self.sent.lock().unwrap().push(envelope.clone());
            Ok(())
        }
    }

    async fn mock_services() -> (MockServer, Config) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .and(query_param("q", "two articles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "articles": [
                    { "title": "TSMC adds capacity", "source": { "name": "Wire" }, "url": "https://a.example" },
                    { "title": "ASML ships tools", "source": { "name": "Daily" }, "url": "https://b.example" }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .and(query_param("q", "no articles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "articles": [] })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{ "type": "text", "text": FIXED_BRIEFING }]
            })))
            .mount(&server)
            .await;

        let mut config = test_config(
            &format!("{}/v2/everything", server.uri()),
            &format!("{}/v1/messages", server.uri()),
        );
        config.queries = vec![
            SearchQuery::new("companies", "two articles"),
            SearchQuery::new("policy", "no articles"),
        ];
        (server, config)
    }

    #[tokio::test]
    async fn test_end_to_end_embeds_briefing_and_date() {
        let (server, config) = mock_services().await;
        let mailer = RecordingMailer::default();
        let mut out = Vec::new();

        run(&Client::new(), &config, &mailer, &mut out).await.unwrap();

        let sent = mailer.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        let envelope = &sent[0];
        assert_eq!(envelope.plain_body, FIXED_BRIEFING);
        assert!(envelope.html_body.contains(FIXED_BRIEFING));
        assert!(envelope.html_body.contains(&Local::now().format("%B %d, %Y").to_string()));
        assert!(envelope.subject.starts_with("Semiconductor Industry Brief - "));
        assert!(out.is_empty());

        // The prompt carried only the non-empty category.
        let requests = server.received_requests().await.unwrap();
        let generation = requests
            .iter()
            .find(|r| r.url.path() == "/v1/messages")
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&generation.body).unwrap();
        let prompt = body["messages"][0]["content"].as_str().unwrap();
        assert!(prompt.contains("## COMPANIES"));
        assert!(!prompt.contains("## POLICY\n"));
        assert!(prompt.contains("**TSMC adds capacity** (Wire)"));
    }

    /// Submission fails inside the real SMTP transport. An authentication
    /// rejection needs a TLS-speaking relay, so a refused connection stands
    /// in for it; both surface as `DispatchError::Smtp`.
    #[tokio::test]
    async fn test_dispatch_failure_prints_full_briefing() {
        let (_server, config) = mock_services().await;
        let mailer = SmtpMailer::new(&config);
        let mut out = Vec::new();

        let result = run(&Client::new(), &config, &mailer, &mut out).await;

        assert!(matches!(result, Err(DispatchError::Smtp(_))));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Failed to send email. Briefing content:"));
        assert!(printed.contains(FIXED_BRIEFING));
    }

    #[tokio::test]
    async fn test_total_upstream_failure_still_attempts_delivery() {
        let config = test_config("http://127.0.0.1:1/v2/everything", "http://127.0.0.1:1/v1/messages");
        let mailer = RecordingMailer::default();
        let mut out = Vec::new();

        run(&Client::new(), &config, &mailer, &mut out).await.unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].plain_body.starts_with(crate::briefing::GENERATION_ERROR_PREFIX));
    }
}

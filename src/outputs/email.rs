//! Email submission over implicit-TLS SMTP.

use crate::config::Config;
use crate::error::DispatchError;
use crate::models::EmailEnvelope;
use lettre::message::{Mailbox, MultiPart, SinglePart, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{info, instrument};

/// Sends a composed briefing to its recipient.
pub trait Mailer {
    async fn send(&self, envelope: &EmailEnvelope) -> Result<(), DispatchError>;
}

/// [`Mailer`] backed by an authenticated SMTP relay.
pub struct SmtpMailer {
    host: String,
    port: u16,
    username: String,
    password: String,
    timeout: Duration,
}

impl SmtpMailer {
    /// Authenticate as the configured sender against the configured relay.
    pub fn new(config: &Config) -> Self {
        Self {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            username: config.sender_email.clone(),
            password: config.sender_password.clone(),
            timeout: config.request_timeout,
        }
    }
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Build a `multipart/alternative` message: plain text first, then HTML.
pub fn build_message(envelope: &EmailEnvelope) -> Result<Message, DispatchError> {
    let from = parse_mailbox("sender", &envelope.sender)?;
    let to = parse_mailbox("recipient", &envelope.recipient)?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(envelope.subject.as_str())
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(envelope.plain_body.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(envelope.html_body.clone()),
                ),
        )?;
    Ok(message)
}

fn parse_mailbox(role: &'static str, address: &str) -> Result<Mailbox, DispatchError> {
    address.parse().map_err(|source| DispatchError::Address {
        role,
        address: address.to_string(),
        source,
    })
}

impl Mailer for SmtpMailer {
    #[instrument(level = "info", skip_all, fields(host = %self.host, port = self.port))]
    async fn send(&self, envelope: &EmailEnvelope) -> Result<(), DispatchError> {
        let message = build_message(envelope)?;

        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)?
                .port(self.port)
                .credentials(Credentials::new(self.username.clone(), self.password.clone()))
                .timeout(Some(self.timeout))
                .build();

        mailer.send(message).await?;

        info!(to = %envelope.recipient, subject = %envelope.subject, "Email sent successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    fn envelope() -> EmailEnvelope {
        EmailEnvelope {
            subject: "Semiconductor Industry Brief - October 18, 2026".to_string(),
            plain_body: "plain briefing".to_string(),
            html_body: "<div>html briefing</div>".to_string(),
            sender: "agent@example.com".to_string(),
            recipient: "comms@example.com".to_string(),
        }
    }

    #[test]
    fn test_message_has_both_alternatives() {
        let message = build_message(&envelope()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("multipart/alternative"));
        let plain = raw.find("text/plain").unwrap();
        let html = raw.find("text/html").unwrap();
        assert!(plain < html);
        assert!(raw.contains("plain briefing"));
        assert!(raw.contains("html briefing"));
        assert!(raw.contains("To: comms@example.com"));
    }

    #[test]
    fn test_invalid_recipient_is_reported() {
        let mut env = envelope();
        env.recipient = "not an address".to_string();

        let err = build_message(&env).unwrap_err();
        assert!(matches!(err, DispatchError::Address { role: "recipient", .. }));
    }

    #[tokio::test]
    async fn test_unreachable_relay_fails_without_panicking() {
        // test_config points SMTP at 127.0.0.1:1, where nothing listens.
        let config = test_config("http://unused.invalid", "http://unused.invalid");
        let mailer = SmtpMailer::new(&config);

        assert!(mailer.send(&envelope()).await.is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let config = test_config("http://unused.invalid", "http://unused.invalid");
        let rendered = format!("{:?}", SmtpMailer::new(&config));
        assert!(!rendered.contains("app-password"));
    }
}

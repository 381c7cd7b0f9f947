//! HTML presentation of the briefing email.

use crate::config::Config;
use crate::models::EmailEnvelope;

/// Wrap the briefing body in the email's HTML template.
///
/// The body is inserted as-is inside a `pre-wrap` block so the model's line
/// breaks and bullets survive.
pub fn render_html(body: &str, date_label: &str) -> String {
    format!(
        r#"
<html>
  <body style="font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px;">
    <h2 style="color: #2c3e50;">🔬 Semiconductor Industry Intelligence Brief</h2>
    <p style="color: #7f8c8d;">{date_label}</p>
    <hr style="border: 1px solid #ecf0f1;">
    <div style="white-space: pre-wrap; line-height: 1.6;">{body}</div>
    <hr style="border: 1px solid #ecf0f1; margin-top: 30px;">
    <p style="color: #95a5a6; font-size: 11px;">
      Generated automatically by your AI Intelligence Agent
    </p>
  </body>
</html>
"#
    )
}

/// Subject line for the day's briefing.
pub fn subject_line(date_label: &str) -> String {
    format!("Semiconductor Industry Brief - {date_label}")
}

impl EmailEnvelope {
    /// Build the plain and HTML alternatives for one briefing.
    pub fn compose(config: &Config, subject: String, body: &str, date_label: &str) -> Self {
        Self {
            subject,
            plain_body: body.to_string(),
            html_body: render_html(body, date_label),
            sender: config.sender_email.clone(),
            recipient: config.recipient_email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    #[test]
    fn test_html_contains_date_and_raw_body() {
        let body = "📊 EXECUTIVE SUMMARY\n- TSMC & ASML <up>\n";
        let html = render_html(body, "October 18, 2026");

        assert!(html.contains("<p style=\"color: #7f8c8d;\">October 18, 2026</p>"));
        assert!(html.contains(body));
        assert_eq!(html.matches("<hr").count(), 2);
        assert!(html.contains("Generated automatically"));
    }

    #[test]
    fn test_compose_envelope() {
        let config = test_config("http://unused.invalid", "http://unused.invalid");
        let envelope = EmailEnvelope::compose(
            &config,
            subject_line("October 18, 2026"),
            "briefing body",
            "October 18, 2026",
        );

        assert_eq!(envelope.subject, "Semiconductor Industry Brief - October 18, 2026");
        assert_eq!(envelope.plain_body, "briefing body");
        assert!(envelope.html_body.contains("briefing body"));
        assert_eq!(envelope.sender, "agent@example.com");
        assert_eq!(envelope.recipient, "comms@example.com");
    }
}

//! Briefing synthesis: collected articles → prompt → generated briefing.
//!
//! Category sections appear in the order the queries were declared, and
//! categories without articles are left out entirely. Generation failures
//! are returned as readable error text rather than propagated, so the
//! pipeline always has a body to send.

use crate::api::AskAsync;
use crate::models::CategorizedResults;
use crate::utils::section_header;
use tracing::{error, info, instrument};

/// Prefix of the briefing body produced when generation fails.
pub const GENERATION_ERROR_PREFIX: &str = "Error calling generation service:";

/// Report sections the model is asked to produce, in order.
pub const REPORT_SECTIONS: [&str; 5] = [
    "EXECUTIVE SUMMARY",
    "KEY DEVELOPMENTS",
    "POLICY & REGULATION",
    "SUPPLY CHAIN",
    "COMMUNICATIONS IMPLICATIONS",
];

/// Flatten the categorized results into the text block embedded in the prompt.
pub fn assemble_news_text(results: &CategorizedResults) -> String {
    let mut text = String::from("# Semiconductor Industry News - Past 24 Hours\n\n");

    for (category, outcome) in results.iter() {
        let articles = outcome.articles();
        if articles.is_empty() {
            continue;
        }
        text.push_str(&format!("\n## {}\n\n", section_header(category)));
        for article in articles {
            text.push_str(&format!(
                "**{}** ({})\n{}\nLink: {}\n\n",
                article.title, article.source_name, article.description, article.url
            ));
        }
    }
    text
}

/// Embed the news text in the fixed analyst instructions.
pub fn build_prompt(news_text: &str) -> String {
    format!(
        "You are a semiconductor industry analyst creating an executive briefing for corporate communications professionals.

Analyze this news and create a concise, actionable briefing:

{news_text}

Format your response as:

📊 {}
[2-3 sentence overview of the past day]

🔑 {}
[3-5 bullet points of most important news]

📋 {}
[Any significant policy changes or regulatory news]

⛓️ {}
[Supply chain developments, shortages, or manufacturing news]

💡 {}
[What corporate comms teams should know or monitor]

Keep it concise, professional, and actionable.",
        REPORT_SECTIONS[0],
        REPORT_SECTIONS[1],
        REPORT_SECTIONS[2],
        REPORT_SECTIONS[3],
        REPORT_SECTIONS[4],
    )
}

/// Produce the briefing text for the collected news.
///
/// Never fails: if generation errors, the returned text starts with
/// [`GENERATION_ERROR_PREFIX`] followed by the cause.
#[instrument(level = "info", skip_all, fields(articles = results.article_count()))]
pub async fn synthesize<A: AskAsync>(model: &A, results: &CategorizedResults) -> String {
    let prompt = build_prompt(&assemble_news_text(results));
    info!(prompt_chars = prompt.len(), "Requesting briefing");

    match model.ask(&prompt).await {
        Ok(briefing) => briefing,
        Err(e) => {
            error!(error = %e, "Generation failed; briefing will carry the error");
            format!("{GENERATION_ERROR_PREFIX} {e}")
        }
    }
}

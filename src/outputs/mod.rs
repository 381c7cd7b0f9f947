//! Briefing delivery.
//!
//! # Submodules
//!
//! - [`html`]: HTML template, subject line, and [`crate::models::EmailEnvelope`] composition
//! - [`email`]: the [`email::Mailer`] seam and its SMTP implementation
//!
//! # Message Structure
//!
//! ```text
//! multipart/alternative
//! ├── text/plain   briefing text as generated
//! └── text/html    same text inside the branded template
//! ```

pub mod email;
pub mod html;

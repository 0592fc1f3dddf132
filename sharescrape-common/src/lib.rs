//! Common types and utilities shared across Sharescrape crates.
//!
//! This crate defines the conversation data model, the source profiles that
//! describe a chat-share platform's markup, observability helpers, and the
//! shared error type. It stays lightweight so the extractor and the config
//! loader can both depend on it.
//!
//! # Overview
//!
//! - [`Message`] and [`Role`]: one extracted question or answer
//! - [`Conversation`]: the result handed back to callers
//! - [`SourceProfile`] and [`Markers`]: structural contract of a share page
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`SharescrapeError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! ```rust
//! use sharescrape_common::{Role, SourceProfile};
//!
//! let profile = SourceProfile::default();
//! assert_eq!(profile.model, "deepSeek");
//! assert_eq!(profile.markers.question, "div.fbb737a4");
//! assert_eq!(Role::Answer.label(), "ANSWER");
//! ```
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod observability;

/// Who produced a message on the share page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Question,
    Answer,
}

impl Role {
    /// Literal variant name, also used as the CSS class in rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Question => "Question",
            Role::Answer => "Answer",
        }
    }

    /// Uppercased label shown in front of each rendered message.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Question => "QUESTION",
            Role::Answer => "ANSWER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted question or answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    /// Normalized text. Answers join their paragraphs with `\n`.
    pub content: String,
    /// Code blocks of an answer joined by a `---` line; `None` when there are none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Message {
    pub fn question(content: impl Into<String>) -> Self {
        Self {
            role: Role::Question,
            content: content.into(),
            code: None,
        }
    }

    pub fn answer(content: impl Into<String>, code: Option<String>) -> Self {
        Self {
            role: Role::Answer,
            content: content.into(),
            code,
        }
    }
}

/// Result of a single extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Tag identifying the source platform, e.g. `deepSeek`.
    pub model: String,
    /// Rendered standalone HTML document.
    pub content: String,
    #[serde(with = "iso_millis")]
    pub scraped_at: DateTime<Utc>,
    /// UTF-8 byte length of the input HTML.
    pub source_html_bytes: usize,
}

impl Conversation {
    /// `scraped_at` as an ISO-8601 string with millisecond precision.
    pub fn scraped_at_iso(&self) -> String {
        iso_millis::format(&self.scraped_at)
    }
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// CSS selectors locating the interesting parts of a share page.
///
/// These strings track the third-party page markup and change whenever the
/// platform ships a new frontend, so they are configuration rather than code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    /// Container of one user prompt.
    #[serde(default = "default_question_marker")]
    pub question: String,
    /// Container of one model response.
    #[serde(default = "default_answer_marker")]
    pub answer: String,
    /// Prose paragraph inside an answer.
    #[serde(default = "default_paragraph_marker")]
    pub paragraph: String,
    /// Preformatted code block inside an answer.
    #[serde(default = "default_code_block_marker")]
    pub code_block: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            question: default_question_marker(),
            answer: default_answer_marker(),
            paragraph: default_paragraph_marker(),
            code_block: default_code_block_marker(),
        }
    }
}

fn default_question_marker() -> String {
    "div.fbb737a4".into()
}
fn default_answer_marker() -> String {
    "div.ds-markdown.ds-markdown--block".into()
}
fn default_paragraph_marker() -> String {
    "p.ds-markdown-paragraph".into()
}
fn default_code_block_marker() -> String {
    "div.md-code-block pre".into()
}

/// Everything the extractor needs to know about one chat-share platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProfile {
    /// Tag copied into [`Conversation::model`].
    #[serde(default = "default_model")]
    pub model: String,
    /// Human readable platform name used in the rendered title and heading.
    #[serde(default = "default_display_name")]
    pub display_name: String,
    #[serde(default)]
    pub markers: Markers,
}

impl Default for SourceProfile {
    fn default() -> Self {
        Self {
            model: default_model(),
            display_name: default_display_name(),
            markers: Markers::default(),
        }
    }
}

fn default_model() -> String {
    "deepSeek".into()
}
fn default_display_name() -> String {
    "DeepSeek".into()
}

/// Error types used across the Sharescrape crates.
#[derive(thiserror::Error, Debug)]
pub enum SharescrapeError {
    /// A structural marker is not a valid CSS selector.
    #[error("Invalid {field} marker `{marker}`: {reason}")]
    InvalidMarker {
        field: &'static str,
        marker: String,
        reason: String,
    },

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`SharescrapeError`].
pub type Result<T> = std::result::Result<T, SharescrapeError>;

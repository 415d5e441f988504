//! Value types that flow through the article pipeline.
//!
//! Both types are constructed fresh per generation/publish request and carry
//! no identity or persistence concerns.

use serde::{Deserialize, Serialize};

/// A structured article recovered from an AI completion.
///
/// `title` and `content` are guaranteed non-empty by the recovery parser;
/// `content` is HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    /// `None` when the response carried no usable tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// A keyword-to-URL linking rule.
///
/// Keywords match case-insensitively but are inserted verbatim when a new
/// link paragraph is backfilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoLinkRule {
    pub keyword: String,
    pub url: String,
    #[serde(alias = "maxCount")]
    pub max_count: u32,
}

impl SeoLinkRule {
    #[must_use]
    pub fn new(keyword: impl Into<String>, url: impl Into<String>, max_count: u32) -> Self {
        Self {
            keyword: keyword.into(),
            url: url.into(),
            max_count,
        }
    }

    /// A rule with an empty keyword or url contributes nothing.
    #[must_use]
    pub fn is_applicable(&self) -> bool {
        !self.keyword.is_empty() && !self.url.is_empty()
    }

    /// Renders the anchor markup this rule wraps around `text`.
    #[must_use]
    pub fn anchor(&self, text: &str) -> String {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener">{text}</a>"#,
            self.url
        )
    }
}

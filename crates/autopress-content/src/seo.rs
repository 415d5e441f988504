//! Keyword link injection for publishable article HTML.
//!
//! Each rule runs in two phases over the current state of the document:
//!
//! 1. **Scan**: walk the tag/text segments, skipping text inside `<h1>`–`<h6>`,
//!    and wrap up to `max_count` case-insensitive keyword matches in anchors.
//! 2. **Backfill**: if the scan fell short of `max_count`, insert standalone
//!    keyword link paragraphs after evenly spaced `</p>` boundaries.
//!
//! Rules are applied in order and independently, so a later rule sees (and
//! may link inside) anchors added by an earlier one. Running the injector
//! twice over its own output is not idempotent: backfilled paragraphs add
//! new keyword text.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::html::{heading_boundary, segments, Segment, Spanned};
use autopress_core::SeoLinkRule;

static PARAGRAPH_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</p>").expect("valid paragraph close regex"));

/// A keyword occurrence the scan phase will wrap in an anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionPosition {
    /// Byte offset of the match in the scanned content.
    pub byte_offset: usize,
    /// The matched text with its original casing.
    pub matched_text: String,
}

/// What a single rule did to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub keyword: String,
    /// Existing occurrences wrapped in anchors during the scan phase.
    pub linked: usize,
    /// New keyword link paragraphs inserted during backfill.
    pub backfilled: usize,
    /// The rule had an empty keyword or url and was not applied.
    pub skipped: bool,
}

/// Inserts keyword links into `content` according to `rules`.
///
/// Total: rules with an empty keyword or url are skipped, and an empty rule
/// set returns `content` unchanged.
#[must_use]
pub fn inject_seo_links(content: &str, rules: &[SeoLinkRule]) -> String {
    inject_seo_links_with_report(content, rules).0
}

/// Like [`inject_seo_links`], also returning one [`RuleOutcome`] per rule in
/// the order given.
#[must_use]
pub fn inject_seo_links_with_report(
    content: &str,
    rules: &[SeoLinkRule],
) -> (String, Vec<RuleOutcome>) {
    let mut html = content.to_owned();
    let mut outcomes = Vec::with_capacity(rules.len());

    for rule in rules {
        if !rule.is_applicable() {
            tracing::debug!(
                keyword = %rule.keyword,
                url = %rule.url,
                "skipping link rule with empty keyword or url"
            );
            outcomes.push(RuleOutcome {
                keyword: rule.keyword.clone(),
                linked: 0,
                backfilled: 0,
                skipped: true,
            });
            continue;
        }

        let (next, outcome) = apply_rule(&html, rule);
        tracing::debug!(
            keyword = %rule.keyword,
            max_count = rule.max_count,
            linked = outcome.linked,
            backfilled = outcome.backfilled,
            "applied link rule"
        );
        html = next;
        outcomes.push(outcome);
    }

    (html, outcomes)
}

fn apply_rule(html: &str, rule: &SeoLinkRule) -> (String, RuleOutcome) {
    let quota = usize::try_from(rule.max_count).unwrap_or(usize::MAX);

    let positions = find_insertion_positions(html, &rule.keyword, quota);
    let linked_html = link_positions(html, &positions, rule);

    let remaining = quota.saturating_sub(positions.len());
    let (out, backfilled) = backfill(linked_html, rule, remaining);

    let outcome = RuleOutcome {
        keyword: rule.keyword.clone(),
        linked: positions.len(),
        backfilled,
        skipped: false,
    };
    (out, outcome)
}

/// Scan accumulator threaded through the segment walk.
#[derive(Debug, Default)]
struct ScanState {
    inside_heading: bool,
    positions: Vec<InsertionPosition>,
}

/// Finds up to `max_count` case-insensitive occurrences of `keyword` in the
/// text of `content`, skipping markup and heading text.
///
/// The cap spans the whole document, not each text segment. Regex
/// metacharacters in `keyword` match literally.
#[must_use]
pub fn find_insertion_positions(
    content: &str,
    keyword: &str,
    max_count: usize,
) -> Vec<InsertionPosition> {
    if keyword.is_empty() || max_count == 0 {
        return Vec::new();
    }

    let Ok(matcher) = RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
    else {
        tracing::debug!(keyword, "keyword pattern exceeds regex limits; no matches");
        return Vec::new();
    };

    let mut state = ScanState::default();
    for Spanned { offset, segment } in segments(content) {
        if state.positions.len() >= max_count {
            break;
        }
        match segment {
            Segment::Tag(tag) => {
                if let Some(opening) = heading_boundary(tag) {
                    state.inside_heading = opening;
                }
            }
            Segment::Text(text) if !state.inside_heading => {
                let budget = max_count - state.positions.len();
                state
                    .positions
                    .extend(matcher.find_iter(text).take(budget).map(|m| {
                        InsertionPosition {
                            byte_offset: offset + m.start(),
                            matched_text: m.as_str().to_owned(),
                        }
                    }));
            }
            Segment::Text(_) => {}
        }
    }

    state.positions
}

/// Wraps each position's matched text in the rule's anchor. Positions must
/// be ascending and non-overlapping.
fn link_positions(html: &str, positions: &[InsertionPosition], rule: &SeoLinkRule) -> String {
    if positions.is_empty() {
        return html.to_owned();
    }

    let mut out = String::with_capacity(html.len() + positions.len() * (rule.url.len() + 48));
    let mut cursor = 0;
    for pos in positions {
        out.push_str(&html[cursor..pos.byte_offset]);
        out.push_str(&rule.anchor(&pos.matched_text));
        cursor = pos.byte_offset + pos.matched_text.len();
    }
    out.push_str(&html[cursor..]);
    out
}

/// Inserts up to `remaining` keyword link paragraphs, returning the new
/// document and the number inserted.
fn backfill(mut html: String, rule: &SeoLinkRule, remaining: usize) -> (String, usize) {
    if remaining == 0 {
        return (html, 0);
    }

    let paragraph = format!("<p>{}</p>", rule.anchor(&rule.keyword));
    // Every closing tag is a boundary, including ones without an opener
    // (normalized bodies start with `Intro.</p><p>`).
    let paragraph_ends: Vec<usize> = PARAGRAPH_CLOSE_RE
        .find_iter(&html)
        .map(|m| m.end())
        .collect();

    if paragraph_ends.is_empty() {
        tracing::debug!(
            keyword = %rule.keyword,
            remaining,
            "no paragraph boundary to backfill links into"
        );
        return (html, 0);
    }

    let indices = backfill_indices(paragraph_ends.len(), remaining);
    // Highest offset first so earlier offsets stay valid.
    for &idx in indices.iter().rev() {
        html.insert_str(paragraph_ends[idx], &paragraph);
    }

    (html, indices.len())
}

/// Paragraph indices, ascending and distinct, after which backfilled links
/// go: every `max(1, total / (remaining + 1))`-th paragraph, clamped to the
/// last one.
fn backfill_indices(total_paragraphs: usize, remaining: usize) -> Vec<usize> {
    if total_paragraphs == 0 || remaining == 0 {
        return Vec::new();
    }

    let interval = (total_paragraphs / remaining.saturating_add(1)).max(1);
    let last = total_paragraphs - 1;

    // Past `total_paragraphs` picks every index is clamped to `last`.
    let mut indices: Vec<usize> = (0..remaining.min(total_paragraphs))
        .map(|i| interval.saturating_mul(i + 1).saturating_sub(1).min(last))
        .collect();
    indices.dedup();
    indices
}

#[cfg(test)]
#[path = "seo_test.rs"]
mod tests;

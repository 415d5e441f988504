//! Recovery of a structured article from raw AI completion text.
//!
//! Model output is not guaranteed to be valid JSON even when the prompt asks
//! for it. Recovery runs a strict parse over the outermost `{ … }` span and,
//! when that fails, falls back to extracting each field by pattern. Only the
//! absence of a usable title or content is fatal.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ContentError;
use crate::normalize::{clean_title, normalize_content};
use autopress_core::GenerationResult;

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+-]*").expect("valid code fence regex"));
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"title"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("valid title regex")
});
static EXCERPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"excerpt"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("valid excerpt regex")
});
static TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)"tags"\s*:\s*(\[.*?\])"#).expect("valid tags regex"));

// Candidate terminators for a fallback-extracted content value.
static EXCERPT_AFTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""\s*,\s*"excerpt""#).expect("valid excerpt delimiter regex"));
static TAGS_AFTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""\s*,\s*"tags""#).expect("valid tags delimiter regex"));
static OBJECT_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""\s*\}"#).expect("valid object end regex"));

/// Fields pulled out of a completion before validation.
#[derive(Debug, Default, PartialEq, Eq)]
struct RawFields {
    title: Option<String>,
    content: Option<String>,
    excerpt: Option<String>,
    tags: Option<Vec<String>>,
}

/// Recovers a [`GenerationResult`] from raw completion text.
///
/// Code fences are stripped, then a strict JSON parse is attempted over the
/// first `{` through the last `}`. If that fails, `title`, `content`,
/// `excerpt` and `tags` are extracted individually; the content extractor
/// tolerates unescaped quotes and newlines. The title is cleaned with
/// [`clean_title`] and the content normalized with [`normalize_content`].
///
/// # Errors
///
/// Returns [`ContentError::MalformedResponse`] when no `"content"` key can be
/// found, no `"title"` value can be matched, or either field is empty after
/// recovery. No placeholder content is ever substituted.
pub fn recover_article(raw: &str) -> Result<GenerationResult, ContentError> {
    let cleaned = strip_code_fences(raw);

    let fields = match parse_strict(&cleaned) {
        Some(fields) => fields,
        None => {
            tracing::debug!(
                len = cleaned.len(),
                "strict parse failed; falling back to field extraction"
            );
            parse_fallback(&cleaned)?
        }
    };

    build_result(fields).inspect_err(|e| {
        tracing::warn!(error = %e, "could not recover article from AI response");
    })
}

/// Removes every triple-backtick fence marker, with or without a language tag.
fn strip_code_fences(raw: &str) -> String {
    FENCE_RE.replace_all(raw, "").trim().to_string()
}

/// The first `{` through the last `}`, if both exist in that order.
fn json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn parse_strict(text: &str) -> Option<RawFields> {
    let span = json_span(text)?;
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(span) else {
        return None;
    };

    let string_field = |map: &Map<String, Value>, key: &str| {
        map.get(key).and_then(Value::as_str).map(str::to_owned)
    };

    Some(RawFields {
        title: string_field(&map, "title"),
        content: string_field(&map, "content"),
        excerpt: string_field(&map, "excerpt"),
        tags: map.get("tags").and_then(Value::as_array).map(|v| string_items(v)),
    })
}

fn parse_fallback(text: &str) -> Result<RawFields, ContentError> {
    let content = extract_content_value(text)?;

    let title = TITLE_RE
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| unescape_json_string(m.as_str()))
        .ok_or_else(|| ContentError::malformed("could not locate a \"title\" value"))?;

    let excerpt = EXCERPT_RE
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| unescape_json_string(m.as_str()));

    let tags = TAGS_RE
        .captures(text)
        .and_then(|cap| cap.get(1))
        .and_then(|m| serde_json::from_str::<Vec<Value>>(m.as_str()).ok())
        .map(|items| string_items(&items));

    Ok(RawFields {
        title: Some(title),
        content: Some(content),
        excerpt,
        tags,
    })
}

/// Extracts the `"content"` value without relying on correct escaping.
///
/// The value runs from the opening quote after the key's colon to the
/// earliest of the last `", "excerpt"`, the last `", "tags"` and the last
/// `"}` found after it. Without any terminator the rest of the text is taken.
fn extract_content_value(text: &str) -> Result<String, ContentError> {
    const KEY: &str = "\"content\"";

    let key_pos = text
        .find(KEY)
        .ok_or_else(|| ContentError::malformed("no \"content\" key found"))?;
    let after_key = key_pos + KEY.len();
    let colon = text[after_key..]
        .find(':')
        .map(|rel| after_key + rel)
        .ok_or_else(|| ContentError::malformed("\"content\" key has no value"))?;
    let value_start = text[colon + 1..]
        .find('"')
        .map(|rel| colon + 1 + rel + 1)
        .ok_or_else(|| ContentError::malformed("\"content\" value is not a string"))?;

    let tail = &text[value_start..];
    let end = [&*EXCERPT_AFTER_RE, &*TAGS_AFTER_RE, &*OBJECT_END_RE]
        .iter()
        .filter_map(|re| re.find_iter(tail).last().map(|m| m.start()))
        .min();

    let value = match end {
        Some(end) => &tail[..end],
        None => tail
            .trim_end()
            .trim_end_matches('}')
            .trim_end()
            .trim_end_matches('"'),
    };

    // Escaped newlines are left in place for the normalizer.
    Ok(value.replace("\\\"", "\""))
}

/// Decodes JSON escapes in a captured string body, keeping the raw text when
/// it is not a valid JSON string literal.
fn unescape_json_string(body: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{body}\"")).unwrap_or_else(|_| body.to_string())
}

/// Keeps the non-empty string entries of a JSON array, trimmed.
fn string_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn build_result(fields: RawFields) -> Result<GenerationResult, ContentError> {
    let title = fields
        .title
        .map(|t| clean_title(&t))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ContentError::missing_field("title"))?;

    let content = fields
        .content
        .map(|c| normalize_content(&c))
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ContentError::missing_field("content"))?;

    let excerpt = fields
        .excerpt
        .map(|e| e.trim().to_string())
        .unwrap_or_default();

    let tags = fields.tags.filter(|t| !t.is_empty());

    Ok(GenerationResult {
        title,
        content,
        excerpt,
        tags,
    })
}

#[cfg(test)]
#[path = "recover_test.rs"]
mod tests;

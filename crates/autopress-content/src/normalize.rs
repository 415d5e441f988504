//! Newline-to-markup normalization for article bodies and title cleanup.

use std::sync::LazyLock;

use regex::Regex;

static DOUBLE_BR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<br>\s*<br>").expect("valid double br regex"));

/// Converts the newline conventions found in AI-generated bodies into HTML
/// paragraph and line-break markup.
///
/// Rules run in order over the whole string; later rules consume artifacts
/// of earlier ones:
///
/// 1. escaped `\n\n` (backslash-n tokens) becomes `</p><p>`
/// 2. remaining escaped `\n` becomes `<br>`
/// 3. literal double newlines become `</p><p>`
/// 4. remaining literal newlines become a single space
/// 5. empty `<p></p>` pairs are dropped
/// 6. `<br>` pairs (optionally whitespace-separated) become `</p><p>`
/// 7. the result is trimmed
#[must_use]
pub fn normalize_content(raw: &str) -> String {
    let text = raw
        .replace(r"\n\n", "</p><p>")
        .replace(r"\n", "<br>")
        .replace("\n\n", "</p><p>")
        .replace('\n', " ")
        .replace("<p></p>", "");

    DOUBLE_BR_RE
        .replace_all(&text, "</p><p>")
        .trim()
        .to_string()
}

/// Replaces every colon in a title with a space, collapses whitespace runs
/// and trims.
#[must_use]
pub fn clean_title(raw: &str) -> String {
    raw.replace(':', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_double_newline_becomes_paragraph_break() {
        assert_eq!(
            normalize_content(r"<p>One.\n\nTwo.</p>"),
            "<p>One.</p><p>Two.</p>"
        );
    }

    #[test]
    fn escaped_single_newline_becomes_line_break() {
        assert_eq!(
            normalize_content(r"<p>One.\nTwo.</p>"),
            "<p>One.<br>Two.</p>"
        );
    }

    #[test]
    fn literal_double_newline_becomes_paragraph_break() {
        assert_eq!(
            normalize_content("<p>One.\n\nTwo.</p>"),
            "<p>One.</p><p>Two.</p>"
        );
    }

    #[test]
    fn literal_single_newline_becomes_space() {
        assert_eq!(normalize_content("<p>One.\nTwo.</p>"), "<p>One. Two.</p>");
    }

    #[test]
    fn empty_paragraph_pairs_are_removed() {
        // The break at the very start produces "<p></p><p>" which collapses.
        assert_eq!(
            normalize_content("<p>\n\nBody.</p>"),
            "<p>Body.</p>"
        );
    }

    #[test]
    fn spaced_line_break_pair_becomes_paragraph_break() {
        assert_eq!(
            normalize_content("<p>One.<br> <br>Two.</p>"),
            "<p>One.</p><p>Two.</p>"
        );
    }

    #[test]
    fn escaped_newlines_split_by_whitespace_become_paragraph_break() {
        // Rule 2 yields "<br> <br>", which rule 6 then folds.
        assert_eq!(
            normalize_content(r"<p>One.\n \nTwo.</p>"),
            "<p>One.</p><p>Two.</p>"
        );
    }

    #[test]
    fn output_is_trimmed() {
        assert_eq!(normalize_content("  <p>Body.</p>\n"), "<p>Body.</p>");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(normalize_content("no markup here"), "no markup here");
    }

    #[test]
    fn clean_title_replaces_colons() {
        assert_eq!(
            clean_title("Best: Budget Laptops: 2024"),
            "Best Budget Laptops 2024"
        );
    }

    #[test]
    fn clean_title_collapses_whitespace_and_trims() {
        assert_eq!(clean_title("  Review :  the   Pixel\t9 "), "Review the Pixel 9");
    }

    #[test]
    fn clean_title_only_colons_is_empty() {
        assert_eq!(clean_title(" : :: "), "");
    }
}

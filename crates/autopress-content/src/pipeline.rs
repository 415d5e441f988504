//! End-to-end assembly of a publishable article.

use crate::error::ContentError;
use crate::recover::recover_article;
use crate::seo::inject_seo_links_with_report;
use autopress_core::{GenerationResult, SeoLinkRule};

/// Recovers an article from raw completion text and injects keyword links
/// into its content.
///
/// The returned record's `content` is the final HTML for the post body.
///
/// # Errors
///
/// Returns [`ContentError::MalformedResponse`] if the completion yields no
/// usable title/content pair. Link injection itself never fails.
pub fn assemble_article(
    raw_response: &str,
    rules: &[SeoLinkRule],
) -> Result<GenerationResult, ContentError> {
    let mut article = recover_article(raw_response)?;

    let (content, outcomes) = inject_seo_links_with_report(&article.content, rules);
    article.content = content;

    let linked: usize = outcomes.iter().map(|o| o.linked).sum();
    let backfilled: usize = outcomes.iter().map(|o| o.backfilled).sum();
    tracing::info!(
        title = %article.title,
        content_len = article.content.len(),
        rules = rules.len(),
        linked,
        backfilled,
        "assembled article"
    );

    Ok(article)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_links_recovered_content() {
        let raw = r#"```json
{"title":"Phones: 2024","content":"<h2>iPhone</h2>\n<p>The iPhone wins.</p>","excerpt":"E"}
```"#;
        let rules = [SeoLinkRule::new("iPhone", "https://x.com", 1)];
        let article = assemble_article(raw, &rules).unwrap();
        assert_eq!(article.title, "Phones 2024");
        assert_eq!(
            article.content,
            r#"<h2>iPhone</h2> <p>The <a href="https://x.com" target="_blank" rel="noopener">iPhone</a> wins.</p>"#
        );
    }

    #[test]
    fn assemble_propagates_recovery_failure() {
        let rules = [SeoLinkRule::new("iPhone", "https://x.com", 1)];
        let err = assemble_article("no json here", &rules).unwrap_err();
        assert!(matches!(err, ContentError::MalformedResponse { .. }));
    }
}

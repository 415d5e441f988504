//! Command handlers for the CLI.
//!
//! Each handler reads its input, runs the synchronous content pipeline and
//! prints the result to stdout. Diagnostics go through `tracing` to stderr.

use std::path::Path;

use anyhow::Context;
use autopress_content::{assemble_article, inject_seo_links_with_report, recover_article};
use autopress_core::{load_link_rules, AppConfig, SeoLinkRule};
use tokio::io::AsyncReadExt;

/// Read a raw response or HTML document from a file, or stdin for `-`.
///
/// # Errors
///
/// Returns an error if the input cannot be read, exceeds `max_bytes`, or is
/// not valid UTF-8.
pub(crate) async fn read_input(input: &str, max_bytes: usize) -> anyhow::Result<String> {
    let bytes = if input == "-" {
        let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
        let mut buf = Vec::new();
        tokio::io::stdin()
            .take(limit)
            .read_to_end(&mut buf)
            .await
            .context("failed to read stdin")?;
        buf
    } else {
        tokio::fs::read(input)
            .await
            .with_context(|| format!("failed to read {input}"))?
    };

    if bytes.len() > max_bytes {
        anyhow::bail!("input exceeds the {max_bytes}-byte limit (AUTOPRESS_MAX_RESPONSE_BYTES)");
    }

    String::from_utf8(bytes).context("input is not valid UTF-8")
}

/// Load link rules from `rules_path`, falling back to the configured path.
///
/// # Errors
///
/// Returns an error if the rules file cannot be loaded or fails validation.
pub(crate) fn resolve_rules(
    config: &AppConfig,
    rules_path: Option<&Path>,
) -> anyhow::Result<Vec<SeoLinkRule>> {
    let path = rules_path.unwrap_or(config.link_rules_path.as_path());
    let rules_file = load_link_rules(path, config.default_max_links)
        .with_context(|| format!("failed to load link rules from {}", path.display()))?;
    tracing::debug!(path = %path.display(), rules = rules_file.rules.len(), "loaded link rules");
    Ok(rules_file.rules)
}

pub(crate) async fn run_recover(config: &AppConfig, input: &str) -> anyhow::Result<()> {
    let raw = read_input(input, config.max_response_bytes).await?;
    let article = recover_article(&raw)?;
    println!("{}", serde_json::to_string_pretty(&article)?);
    Ok(())
}

pub(crate) async fn run_inject(
    config: &AppConfig,
    input: &str,
    rules_path: Option<&Path>,
) -> anyhow::Result<()> {
    let rules = resolve_rules(config, rules_path)?;
    let html = read_input(input, config.max_response_bytes).await?;

    let (out, outcomes) = inject_seo_links_with_report(&html, &rules);
    for outcome in &outcomes {
        tracing::info!(
            keyword = %outcome.keyword,
            linked = outcome.linked,
            backfilled = outcome.backfilled,
            skipped = outcome.skipped,
            "link rule applied"
        );
    }

    println!("{out}");
    Ok(())
}

pub(crate) async fn run_assemble(
    config: &AppConfig,
    input: &str,
    rules_path: Option<&Path>,
) -> anyhow::Result<()> {
    let rules = resolve_rules(config, rules_path)?;
    let raw = read_input(input, config.max_response_bytes).await?;
    let article = assemble_article(&raw, &rules)?;
    println!("{}", serde_json::to_string_pretty(&article)?);
    Ok(())
}

pub(crate) fn run_rules_check(config: &AppConfig, rules_path: Option<&Path>) -> anyhow::Result<()> {
    let rules = resolve_rules(config, rules_path)?;
    println!("{} rule(s) OK", rules.len());
    for rule in &rules {
        println!("{}", format_rule(rule));
    }
    Ok(())
}

fn format_rule(rule: &SeoLinkRule) -> String {
    format!(
        "  {:<32} {} (max {})",
        rule.keyword, rule.url, rule.max_count
    )
}

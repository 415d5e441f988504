use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::article::SeoLinkRule;
use crate::ConfigError;

#[derive(Debug, Deserialize)]
struct RawLinkRule {
    keyword: String,
    url: String,
    #[serde(default, alias = "maxCount")]
    max_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawLinkRulesFile {
    #[serde(default)]
    rules: Vec<RawLinkRule>,
}

/// A validated set of link rules, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRulesFile {
    pub rules: Vec<SeoLinkRule>,
}

/// Load and validate the link rules from a YAML file.
///
/// Rules that omit `max_count` receive `default_max_count`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_link_rules(path: &Path, default_max_count: u32) -> Result<LinkRulesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_link_rules(&content, default_max_count)
}

/// Parse and validate link rules from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_link_rules(yaml: &str, default_max_count: u32) -> Result<LinkRulesFile, ConfigError> {
    let raw: RawLinkRulesFile = serde_yaml::from_str(yaml)?;

    let rules = raw
        .rules
        .into_iter()
        .map(|r| SeoLinkRule {
            keyword: r.keyword,
            url: r.url,
            max_count: r.max_count.unwrap_or(default_max_count),
        })
        .collect();

    let rules_file = LinkRulesFile { rules };
    validate_link_rules(&rules_file)?;

    Ok(rules_file)
}

fn validate_link_rules(rules_file: &LinkRulesFile) -> Result<(), ConfigError> {
    let mut seen_keywords = HashSet::new();

    for rule in &rules_file.rules {
        if rule.keyword.trim().is_empty() {
            return Err(ConfigError::Validation(
                "rule keyword must be non-empty".to_string(),
            ));
        }

        let url = rule.url.trim();
        if url.is_empty() {
            return Err(ConfigError::Validation(format!(
                "rule '{}' has an empty url",
                rule.keyword
            )));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "rule '{}' has url '{}'; must start with http:// or https://",
                rule.keyword, rule.url
            )));
        }

        if rule.max_count == 0 {
            return Err(ConfigError::Validation(format!(
                "rule '{}' has max_count 0; must be at least 1",
                rule.keyword
            )));
        }

        if !seen_keywords.insert(rule.keyword.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate rule keyword: '{}'",
                rule.keyword
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "link_rules_test.rs"]
mod tests;

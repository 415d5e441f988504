use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// YAML file holding the keyword-to-URL link rules.
    pub link_rules_path: PathBuf,
    /// Quota applied to rules in the rules file that omit `max_count`.
    pub default_max_links: u32,
    /// Upper bound on the size of a raw AI response or HTML input.
    pub max_response_bytes: usize,
}

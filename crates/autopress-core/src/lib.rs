pub mod app_config;
pub mod article;
pub mod config;
pub mod link_rules;

pub use app_config::AppConfig;
pub use article::{GenerationResult, SeoLinkRule};
pub use config::{load_app_config, load_app_config_from_env};
pub use link_rules::{load_link_rules, parse_link_rules, LinkRulesFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read link rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse link rules file: {0}")]
    RulesFileParse(#[from] serde_yaml::Error),

    #[error("link rules validation failed: {0}")]
    Validation(String),
}

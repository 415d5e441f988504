use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("AUTOPRESS_LOG_LEVEL", "info");
    let link_rules_path = PathBuf::from(or_default(
        "AUTOPRESS_LINK_RULES_PATH",
        "./config/link_rules.yaml",
    ));

    let default_max_links = parse_u32("AUTOPRESS_DEFAULT_MAX_LINKS", "1")?;
    if default_max_links == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "AUTOPRESS_DEFAULT_MAX_LINKS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let max_response_bytes = parse_usize("AUTOPRESS_MAX_RESPONSE_BYTES", "1048576")?;
    if max_response_bytes == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "AUTOPRESS_MAX_RESPONSE_BYTES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        link_rules_path,
        default_max_links,
        max_response_bytes,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

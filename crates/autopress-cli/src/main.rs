mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "autopress")]
#[command(about = "Recover AI-generated articles and inject SEO links before publishing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Recover a structured article from a raw AI response and print it as JSON
    Recover {
        /// File holding the raw response, or `-` for stdin
        input: String,
    },
    /// Inject keyword links into an HTML document and print the result
    Inject {
        /// HTML file, or `-` for stdin
        input: String,
        /// Link rules file (defaults to `AUTOPRESS_LINK_RULES_PATH`)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Recover an article and inject keyword links into its content
    Assemble {
        /// File holding the raw response, or `-` for stdin
        input: String,
        /// Link rules file (defaults to `AUTOPRESS_LINK_RULES_PATH`)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Link rules file management
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
}

#[derive(Debug, Subcommand)]
enum RulesCommands {
    /// Validate a link rules file and list its rules
    Check {
        /// Link rules file (defaults to `AUTOPRESS_LINK_RULES_PATH`)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = autopress_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Recover { input } => commands::run_recover(&config, &input).await,
        Commands::Inject { input, rules } => {
            commands::run_inject(&config, &input, rules.as_deref()).await
        }
        Commands::Assemble { input, rules } => {
            commands::run_assemble(&config, &input, rules.as_deref()).await
        }
        Commands::Rules {
            command: RulesCommands::Check { rules },
        } => commands::run_rules_check(&config, rules.as_deref()),
    }
}

#[cfg(test)]
mod tests;

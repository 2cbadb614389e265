//! CLI for the urlsafe checker.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use urlsafe_core::config;

use commands::{run_check, run_config, run_validate, CheckOptions};

/// Top-level CLI for the urlsafe checker.
#[derive(Debug, Parser)]
#[command(name = "urlsafe")]
#[command(about = "urlsafe: check whether a website is safe to visit", long_about = None)]
pub struct Cli {
    /// Safety-check service base URL for this run (overrides config and URLSAFE_API_BASE).
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check a website against the safety-check service.
    Check {
        /// Website address, e.g. example.com or https://www.example.com/page.
        url: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        /// On failure, exit instead of asking whether to retry.
        #[arg(long)]
        no_retry_prompt: bool,
    },

    /// Validate a website address without contacting the service.
    Validate {
        /// Address to validate.
        input: String,
    },

    /// Show the config file path and effective settings.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        cfg.apply_api_base_override(cli.api_base.as_deref());
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Check {
                url,
                json,
                no_retry_prompt,
            } => {
                let opts = CheckOptions {
                    json,
                    prompt_retry: !no_retry_prompt,
                };
                run_check(&cfg, &url, opts).await?;
            }
            CliCommand::Validate { input } => run_validate(&input)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

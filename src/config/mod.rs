pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use toml_config::LedgerConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "housing-ledger")]
#[command(about = "Track housing complex residents and the services billed to them")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the currency symbol from the config
    #[arg(long)]
    pub currency: Option<String>,

    /// Print cost reports as JSON
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file (if any) and applies command-line overrides.
    pub fn load_ledger_config(&self) -> Result<LedgerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                LedgerConfig::from_file(path)?
            }
            None => LedgerConfig::default(),
        };

        if let Some(currency) = &self.currency {
            tracing::debug!("Currency overridden to: {}", currency);
            config.shell.currency = currency.clone();
        }
        if self.json {
            config.shell.report_format = "json".to_string();
        }

        Ok(config)
    }
}

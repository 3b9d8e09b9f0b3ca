pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::shell::Shell;
pub use crate::config::toml_config::LedgerConfig;
pub use crate::core::{BillingSummary, PricingPolicy, Registry, Resident, ResidentCost};
pub use crate::utils::error::{BillingError, Result};

use crate::utils::error::{BillingError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const REPORT_FORMATS: [&str; 2] = ["text", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub shell: ShellConfig,
    pub services: ServicesConfig,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub currency: String,
    pub report_format: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            currency: "$".to_string(),
            report_format: "text".to_string(),
        }
    }
}

/// Suggestion list only: any service name is accepted when billing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub catalog: Vec<String>,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            catalog: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Refuse to add a resident whose name is already registered.
    pub unique_names: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { unique_names: true }
    }
}

impl LedgerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BillingError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LEDGER_CURRENCY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BillingError::Config {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn json_reports(&self) -> bool {
        self.shell.report_format == "json"
    }
}

impl Validate for LedgerConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("shell.currency", &self.shell.currency)?;
        validate_one_of("shell.report_format", &self.shell.report_format, &REPORT_FORMATS)?;

        for service in &self.services.catalog {
            validate_non_empty_string("services.catalog", service)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = LedgerConfig::from_toml_str("").unwrap();

        assert_eq!(config.shell.currency, "$");
        assert!(!config.json_reports());
        assert_eq!(config.services.catalog, vec!["A", "B", "C"]);
        assert!(config.registry.unique_names);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[shell]
currency = "€"
report_format = "json"

[services]
catalog = ["Water", "Heating"]

[registry]
unique_names = false
"#;

        let config = LedgerConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.shell.currency, "€");
        assert!(config.json_reports());
        assert_eq!(config.services.catalog, vec!["Water", "Heating"]);
        assert!(!config.registry.unique_names);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LEDGER_TEST_CURRENCY", "RUB ");

        let toml_content = r#"
[shell]
currency = "${LEDGER_TEST_CURRENCY}"
"#;

        let config = LedgerConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.shell.currency, "RUB ");

        std::env::remove_var("LEDGER_TEST_CURRENCY");
    }

    #[test]
    fn test_config_validation() {
        let config = LedgerConfig::from_toml_str(
            r#"
[shell]
report_format = "xml"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = LedgerConfig::from_toml_str(
            r#"
[services]
catalog = ["A", " "]
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = LedgerConfig::from_toml_str("[shell\ncurrency =").unwrap_err();
        assert!(matches!(err, BillingError::Config { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[registry]\nunique_names = false\n")
            .unwrap();

        let config = LedgerConfig::from_file(temp_file.path()).unwrap();
        assert!(!config.registry.unique_names);
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Invalid service amount: {amount} (must be a non-negative number)")]
    InvalidAmount { amount: f64 },

    #[error("Service quota exceeded for '{service}': {current} + {requested} > {max}")]
    QuotaExceeded {
        service: String,
        current: f64,
        requested: f64,
        max: f64,
    },

    #[error("Cannot add an empty resident")]
    NullResident,

    #[error("Resident not found: {name}")]
    NotFound { name: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Billing,
    Registry,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BillingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BillingError::InvalidAmount { .. } | BillingError::QuotaExceeded { .. } => {
                ErrorCategory::Billing
            }
            BillingError::NullResident | BillingError::NotFound { .. } => ErrorCategory::Registry,
            BillingError::Validation { .. } => ErrorCategory::Input,
            BillingError::Config { .. } => ErrorCategory::Configuration,
            BillingError::Io(_) | BillingError::Serialization(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BillingError::InvalidAmount { .. }
            | BillingError::QuotaExceeded { .. }
            | BillingError::NotFound { .. } => ErrorSeverity::Low,
            BillingError::NullResident | BillingError::Validation { .. } => ErrorSeverity::Medium,
            BillingError::Config { .. } | BillingError::Serialization(_) => ErrorSeverity::High,
            BillingError::Io(_) => ErrorSeverity::Critical,
        }
    }

    /// Domain errors leave state untouched, so the caller can simply re-prompt.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BillingError::InvalidAmount { .. } => "Enter a quantity of zero or more".to_string(),
            BillingError::QuotaExceeded { max, current, .. } => format!(
                "At most {} more unit(s) can be added to this service",
                max - current
            ),
            BillingError::NullResident => "Create the resident before adding it".to_string(),
            BillingError::NotFound { .. } => {
                "Check the spelling or add the resident first".to_string()
            }
            BillingError::Validation { field, .. } => format!("Provide a valid value for {}", field),
            BillingError::Config { .. } => {
                "Check the configuration file for TOML syntax errors".to_string()
            }
            BillingError::Io(_) => "Check that the console or file is readable".to_string(),
            BillingError::Serialization(_) => "Switch the report format to text".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BillingError::InvalidAmount { .. } => {
                "Service quantity cannot be negative.".to_string()
            }
            BillingError::QuotaExceeded { max, .. } => {
                format!("Service quantity cannot exceed {}.", max)
            }
            BillingError::NullResident => "Cannot add an empty resident.".to_string(),
            BillingError::NotFound { name } => {
                format!("Resident named \"{}\" does not exist.", name)
            }
            BillingError::Validation { field, reason, .. } => {
                format!("Invalid {}: {}.", field, reason)
            }
            BillingError::Config { message } => format!("Configuration problem: {}", message),
            BillingError::Io(e) => format!("Input/output failure: {}", e),
            BillingError::Serialization(e) => format!("Could not render the report: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, BillingError>;

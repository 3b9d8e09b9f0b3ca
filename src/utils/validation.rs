use crate::utils::error::{BillingError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Rejects negative quantities. NaN and infinities are rejected too, since
/// they would poison every later quota comparison.
pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(BillingError::InvalidAmount { amount });
    }
    Ok(())
}

pub fn validate_quota(service: &str, current: f64, requested: f64, max: f64) -> Result<()> {
    if current + requested > max {
        return Err(BillingError::QuotaExceeded {
            service: service.to_string(),
            current,
            requested,
            max,
        });
    }
    Ok(())
}

pub fn normalize_service_type(service_type: &str) -> String {
    service_type.trim().to_lowercase()
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BillingError::Validation {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(BillingError::Validation {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Expected one of: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

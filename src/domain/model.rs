use crate::utils::error::Result;
use crate::utils::validation::{
    normalize_service_type, validate_amount, validate_non_empty_string, validate_quota,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Upper bound on the accumulated quantity of any single service.
pub const MAX_SERVICE_QUANTITY: f64 = 100.0;

pub const DISCOUNTED_RATE: f64 = 0.8;
pub const STANDARD_RATE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingPolicy {
    /// Resident with benefits: 20% off every service.
    Discounted,
    Standard,
}

impl PricingPolicy {
    pub fn rate(self) -> f64 {
        match self {
            PricingPolicy::Discounted => DISCOUNTED_RATE,
            PricingPolicy::Standard => STANDARD_RATE,
        }
    }
}

impl fmt::Display for PricingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingPolicy::Discounted => write!(f, "discounted"),
            PricingPolicy::Standard => write!(f, "standard"),
        }
    }
}

/// A billed resident of the housing complex.
///
/// Service keys are stored case-normalized, so `"A"` and `"a"` accumulate
/// into the same entry. Every quantity stays within
/// `0..=MAX_SERVICE_QUANTITY`; a rejected [`Resident::add_service`] leaves
/// the record untouched.
///
/// # Example
/// ```
/// use housing_ledger::{PricingPolicy, Resident};
///
/// let mut alice = Resident::new("Alice", PricingPolicy::Discounted).unwrap();
/// alice.add_service("a", 50.0).unwrap();
/// assert!((alice.total_cost() - 40.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resident {
    name: String,
    pricing_policy: PricingPolicy,
    services: BTreeMap<String, f64>,
}

impl Resident {
    pub fn new(name: impl Into<String>, pricing_policy: PricingPolicy) -> Result<Self> {
        let name = name.into();
        validate_non_empty_string("name", &name)?;

        Ok(Self {
            name,
            pricing_policy,
            services: BTreeMap::new(),
        })
    }

    pub fn add_service(&mut self, service_type: &str, amount: f64) -> Result<()> {
        validate_amount(amount)?;

        let key = normalize_service_type(service_type);
        let current = self.quantity(&key);
        validate_quota(&key, current, amount, MAX_SERVICE_QUANTITY)?;

        tracing::debug!(
            "Resident '{}': {} += {} (now {})",
            self.name,
            key,
            amount,
            current + amount
        );
        *self.services.entry(key).or_insert(0.0) += amount;
        Ok(())
    }

    pub fn total_cost(&self) -> f64 {
        let rate = self.pricing_policy.rate();
        self.services.values().map(|quantity| quantity * rate).sum()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pricing_policy(&self) -> PricingPolicy {
        self.pricing_policy
    }

    /// Accumulated quantity for a service, 0 when nothing was recorded.
    pub fn quantity(&self, service_type: &str) -> f64 {
        self.services
            .get(&normalize_service_type(service_type))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn services(&self) -> impl Iterator<Item = (&str, f64)> {
        self.services.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn total_quantity(&self) -> f64 {
        self.services.values().sum()
    }
}

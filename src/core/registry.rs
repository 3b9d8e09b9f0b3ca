use crate::domain::model::{PricingPolicy, Resident};
use crate::utils::error::{BillingError, Result};
use serde::Serialize;

/// Per-resident line of a [`BillingSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidentCost {
    pub name: String,
    pub pricing_policy: PricingPolicy,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillingSummary {
    pub residents: Vec<ResidentCost>,
    pub total_cost: f64,
}

/// Owning, insertion-ordered collection of residents.
///
/// The registry only grows. Names are not required to be unique; lookups
/// return the first resident added under a given name.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    residents: Vec<Resident>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a `Resident` or an `Option<Resident>`; `None` is rejected with
    /// [`BillingError::NullResident`] and the registry is left as it was.
    pub fn add_resident(&mut self, resident: impl Into<Option<Resident>>) -> Result<()> {
        let resident = resident.into().ok_or_else(|| {
            tracing::warn!("Rejected attempt to add an empty resident");
            BillingError::NullResident
        })?;

        tracing::debug!(
            "Adding resident '{}' ({}) at position {}",
            resident.name(),
            resident.pricing_policy(),
            self.residents.len()
        );
        self.residents.push(resident);
        Ok(())
    }

    pub fn find_resident(&self, name: &str) -> Option<&Resident> {
        self.residents.iter().find(|r| r.name() == name)
    }

    pub fn find_resident_mut(&mut self, name: &str) -> Option<&mut Resident> {
        self.residents.iter_mut().find(|r| r.name() == name)
    }

    /// Resolves `name` and records the service on that resident.
    pub fn add_service(&mut self, name: &str, service_type: &str, amount: f64) -> Result<()> {
        let resident = self
            .find_resident_mut(name)
            .ok_or_else(|| BillingError::NotFound {
                name: name.to_string(),
            })?;

        resident.add_service(service_type, amount).map_err(|e| {
            tracing::warn!("Service rejected for '{}': {}", name, e);
            e
        })
    }

    pub fn calculate_total_costs(&self) -> f64 {
        self.residents.iter().map(Resident::total_cost).sum()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find_resident(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.residents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resident> {
        self.residents.iter()
    }

    pub fn summary(&self) -> BillingSummary {
        let residents: Vec<ResidentCost> = self
            .residents
            .iter()
            .map(|r| ResidentCost {
                name: r.name().to_string(),
                pricing_policy: r.pricing_policy(),
                total_cost: r.total_cost(),
            })
            .collect();
        let total_cost = residents.iter().map(|r| r.total_cost).sum();

        BillingSummary {
            residents,
            total_cost,
        }
    }
}

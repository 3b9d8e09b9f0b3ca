pub mod registry;

pub use crate::domain::model::{PricingPolicy, Resident};
pub use crate::utils::error::Result;
pub use registry::{BillingSummary, Registry, ResidentCost};

mod controller;
mod outcome;
mod policy;

pub use controller::ReconciliationController;
pub use outcome::{ReconcileError, ReconcileOutcome, Result};
pub use policy::{AmbiguousExistence, ProvisioningPolicy, ReconcileOptions};

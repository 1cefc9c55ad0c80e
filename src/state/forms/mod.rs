//! Onboarding wizard form layer
//!
//! Field values, per-step validation and the step navigator.

mod field;
mod wizard;

pub use field::{Tier, WizardField};
pub use wizard::{WizardForm, WizardFormData, WizardStep};

//! Form rendering module
//!
//! - `field_renderer`: text fields and the tier choice
//! - `wizard_form`: the new onboarding wizard

mod field_renderer;
mod wizard_form;

pub use wizard_form::draw_wizard;

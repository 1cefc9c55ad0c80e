//! Onboarding API module for HTTP communication

mod analytics;
mod client;
mod error;
mod submission;
mod traits;
mod types;

pub use analytics::fetch_report;
pub use client::ApiClient;
pub use error::ApiError;
pub use submission::{submit_wizard, NavTarget};
pub use traits::OnboardingApi;

#[cfg(test)]
pub use traits::MockOnboardingApi;

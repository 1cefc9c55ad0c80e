//! Request and response bodies exchanged with the onboarding API

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/onboarding/wizard`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardRequest {
    pub company_name: String,
    pub tax_id: String,
    pub contact_name: String,
    pub email: String,
    pub workflow_type: String,
    pub priority: String,
    pub context: WizardContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardContext {
    pub intake_source: String,
}

/// Body of `POST /api/v1/onboarding/{id}/approve`
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalRequest {
    pub approved: bool,
    pub notes: Option<String>,
}

/// `{success, message, data}` wrapper used by single-resource endpoints
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Paginated list wrapper
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub items: Option<Vec<T>>,
    #[serde(default)]
    pub total: u64,
}

/// `{period_days, total_workflows, breakdown}` returned by the breakdown endpoints
#[derive(Debug, Deserialize)]
pub struct Breakdown<T> {
    #[serde(default = "Vec::new")]
    pub breakdown: Vec<T>,
}

/// `{period_days, total_steps, steps}` returned by the step analytics endpoint
#[derive(Debug, Deserialize)]
pub struct StepReport<T> {
    #[serde(default = "Vec::new")]
    pub steps: Vec<T>,
}

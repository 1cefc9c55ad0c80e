//! Trait abstraction for the API client to enable mocking in tests

use super::error::ApiError;
use super::types::WizardRequest;
use crate::state::{
    AnalyticsSummary, OnboardingStats, StatusShare, StepMetric, TypeShare, WorkflowDetail,
    WorkflowSummary,
};
use async_trait::async_trait;

/// Calls the console makes against the onboarding API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OnboardingApi: Send + Sync {
    /// List onboarding workflows
    async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>, ApiError>;

    /// Get one workflow with its step breakdown
    async fn get_workflow(&self, workflow_id: &str) -> Result<WorkflowDetail, ApiError>;

    /// Get dashboard statistics
    async fn get_stats(&self) -> Result<OnboardingStats, ApiError>;

    /// Headline metrics for the last `days` days
    async fn get_analytics_summary(&self, days: u32) -> Result<AnalyticsSummary, ApiError>;

    /// Workflow counts per status for the last `days` days
    async fn get_status_breakdown(&self, days: u32) -> Result<Vec<StatusShare>, ApiError>;

    /// Workflow counts per workflow type for the last `days` days
    async fn get_type_breakdown(&self, days: u32) -> Result<Vec<TypeShare>, ApiError>;

    /// Per-step execution metrics for the last `days` days
    async fn get_step_analytics(&self, days: u32) -> Result<Vec<StepMetric>, ApiError>;

    /// Start an onboarding through the wizard endpoint.
    /// Returns the created workflow id when the response carries one.
    async fn create_onboarding(&self, request: &WizardRequest)
        -> Result<Option<String>, ApiError>;

    /// Approve a workflow waiting on a human decision
    async fn approve_workflow(
        &self,
        workflow_id: &str,
        notes: Option<String>,
    ) -> Result<(), ApiError>;

    /// Cancel a running workflow
    async fn cancel_workflow(&self, workflow_id: &str) -> Result<(), ApiError>;
}

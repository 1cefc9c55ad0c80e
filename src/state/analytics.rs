//! Aggregated onboarding metrics for the analytics view

use super::workflow::WorkflowStatus;
use serde::Deserialize;

/// Reporting windows offered by the analytics view, in days
pub const ANALYTICS_WINDOWS: [u32; 5] = [7, 14, 30, 90, 180];

/// Window used when nothing else is configured
pub const DEFAULT_ANALYTICS_DAYS: u32 = 30;

/// The API accepts 1 to 365 days
pub const MAX_ANALYTICS_DAYS: u32 = 365;

/// Next window after `days`, wrapping to the shortest
pub fn next_window(days: u32) -> u32 {
    ANALYTICS_WINDOWS
        .iter()
        .copied()
        .find(|w| *w > days)
        .unwrap_or(ANALYTICS_WINDOWS[0])
}

/// Human label for a window, as in the period picker
pub fn window_label(days: u32) -> String {
    match days {
        180 => "Last 6 months".to_string(),
        1 => "Last day".to_string(),
        d => format!("Last {d} days"),
    }
}

/// Headline numbers for the reporting window
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyticsSummary {
    pub period_days: u32,
    pub total_workflows: u64,
    pub completed_workflows: u64,
    pub failed_workflows: u64,
    pub in_progress_workflows: u64,
    pub pending_approval_workflows: u64,
    pub success_rate: f64,
    pub failure_rate: f64,
    pub avg_completion_minutes: f64,
    pub total_customers_onboarded: u64,
    pub generated_at: Option<String>,
}

/// Workflows in one status
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusShare {
    #[serde(default)]
    pub status: WorkflowStatus,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub percentage: f64,
}

/// Workflows of one template
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeShare {
    #[serde(default)]
    pub workflow_type: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub avg_duration_minutes: f64,
}

/// Execution record of one step name across all workflows
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StepMetric {
    pub step_name: String,
    #[serde(default)]
    pub total_executions: u64,
    #[serde(default)]
    pub successful_executions: u64,
    #[serde(default)]
    pub failed_executions: u64,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub avg_duration_minutes: f64,
}

/// Everything the analytics view shows, fetched together on each tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsReport {
    pub summary: AnalyticsSummary,
    pub statuses: Vec<StatusShare>,
    pub types: Vec<TypeShare>,
    pub steps: Vec<StepMetric>,
}

impl AnalyticsReport {
    /// Status rows, largest first
    pub fn statuses_by_count(&self) -> Vec<&StatusShare> {
        let mut rows: Vec<_> = self.statuses.iter().collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    /// Type rows, largest first
    pub fn types_by_count(&self) -> Vec<&TypeShare> {
        let mut rows: Vec<_> = self.types.iter().collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    /// Step with the lowest success rate among those that ran
    pub fn weakest_step(&self) -> Option<&StepMetric> {
        self.steps
            .iter()
            .filter(|s| s.total_executions > 0)
            .min_by(|a, b| a.success_rate.total_cmp(&b.success_rate))
    }
}

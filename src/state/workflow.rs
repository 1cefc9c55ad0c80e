//! Onboarding workflow data as served by the API

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Status of a single workflow step.
///
/// The API knows a few more states than the timeline cares about; they are
/// folded into these four on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum StepStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl From<String> for StepStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "in_progress" | "running" | "waiting" => Self::InProgress,
            "completed" | "skipped" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

impl StepStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Pending => "○",
            Self::InProgress => "◐",
            Self::Completed => "●",
            Self::Failed => "✗",
        }
    }

    /// Short description shown under the step in the timeline
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Pending => "Waiting for previous steps",
            Self::InProgress => "Agent is currently processing this stage",
            Self::Completed => "Task executed successfully",
            Self::Failed => "Step failed",
        }
    }
}

/// Overall status of a workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum WorkflowStatus {
    #[default]
    Pending,
    InProgress,
    AwaitingInput,
    AwaitingApproval,
    Approved,
    Completed,
    Failed,
    Cancelled,
}

impl From<String> for WorkflowStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "in_progress" => Self::InProgress,
            "awaiting_input" => Self::AwaitingInput,
            "awaiting_approval" | "pending_approval" => Self::AwaitingApproval,
            "approved" => Self::Approved,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

impl WorkflowStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::AwaitingInput => "Awaiting Input",
            Self::AwaitingApproval => "Awaiting Approval",
            Self::Approved => "Approved",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Completed, failed and cancelled workflows accept no further actions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// Workflow priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum WorkflowPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl From<String> for WorkflowPriority {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            "urgent" => Self::Urgent,
            _ => Self::Normal,
        }
    }
}

impl WorkflowPriority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

/// Workflow as listed on the workflows page
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowSummary {
    pub id: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub workflow_type: String,
    #[serde(default)]
    pub status: WorkflowStatus,
    #[serde(default)]
    pub priority: WorkflowPriority,
    #[serde(default)]
    pub progress_percentage: u32,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl WorkflowSummary {
    pub fn display_name(&self) -> &str {
        self.customer_name.as_deref().unwrap_or(&self.id)
    }

    pub fn progress(&self) -> u16 {
        self.progress_percentage.min(100) as u16
    }
}

/// One step of a workflow's execution timeline
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowStep {
    pub step_name: String,
    #[serde(default)]
    pub step_type: String,
    #[serde(default)]
    pub sequence_order: i32,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub status: StepStatus,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Full workflow state shown on the detail page
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowDetail {
    #[serde(flatten)]
    pub summary: WorkflowSummary,
    #[serde(default)]
    pub current_step: Option<String>,
    #[serde(default)]
    pub completed_steps: u32,
    #[serde(default)]
    pub total_steps: u32,
    #[serde(default)]
    pub requires_approval: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
}

impl WorkflowDetail {
    /// Steps ordered by their position in the workflow
    pub fn timeline(&self) -> Vec<&WorkflowStep> {
        let mut steps: Vec<_> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.sequence_order);
        steps
    }

    pub fn can_approve(&self) -> bool {
        !self.summary.status.is_terminal()
            && (self.requires_approval
                || self.summary.status == WorkflowStatus::AwaitingApproval)
    }

    pub fn can_cancel(&self) -> bool {
        !self.summary.status.is_terminal()
    }
}

/// Aggregate numbers for the dashboard home
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OnboardingStats {
    pub total_workflows: u64,
    pub active_workflows: u64,
    pub completed_today: u64,
    pub avg_completion_time_minutes: f64,
    pub success_rate: f64,
    pub pending_approvals: u64,
}

/// Accepts RFC 3339 or a naive ISO timestamp (taken as UTC); anything else is dropped
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

//! Application state definitions

use super::analytics::AnalyticsReport;
use super::forms::WizardForm;
use super::polled::PolledResource;
use super::workflow::{OnboardingStats, WorkflowDetail, WorkflowSummary};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Workflows,
    WorkflowDetail,
    Analytics,
    NewOnboarding,
}

impl View {
    /// Form views are skipped when going back through history
    pub fn is_form_view(&self) -> bool {
        matches!(self, Self::NewOnboarding)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Workflows => "Workflows",
            Self::WorkflowDetail => "Workflow",
            Self::Analytics => "Analytics",
            Self::NewOnboarding => "New Onboarding",
        }
    }
}

/// View parameters for navigation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub workflow_id: Option<String>,
}

impl ViewParams {
    pub fn workflow(id: impl Into<String>) -> Self {
        Self {
            workflow_id: Some(id.into()),
        }
    }
}

/// One-line message shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_params: ViewParams,
    pub view_history: Vec<(View, ViewParams)>,

    // Polled data, one slot per view
    pub stats: PolledResource<OnboardingStats>,
    pub workflows: PolledResource<Vec<WorkflowSummary>>,
    pub workflow_detail: PolledResource<WorkflowDetail>,
    pub analytics: PolledResource<AnalyticsReport>,

    /// Reporting window of the analytics view, kept across visits
    pub analytics_days: u32,

    // Wizard, present only while the new-onboarding view is mounted
    pub wizard: Option<WizardForm>,

    // Selection
    pub selected_index: usize,
    pub scroll_offset: usize,

    // Workflow actions
    pub confirm_cancel: Option<String>,
    pub action_in_flight: bool,

    pub status_message: Option<StatusMessage>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Number of rows in the workflow list
    pub fn workflow_count(&self) -> usize {
        self.workflows.data().map_or(0, Vec::len)
    }

    /// Workflow under the cursor in the list view.
    ///
    /// The list can shrink between polls, so the index is clamped.
    pub fn selected_workflow(&self) -> Option<&WorkflowSummary> {
        let items = self.workflows.data()?;
        let last = items.len().checked_sub(1)?;
        items.get(self.selected_index.min(last))
    }

    /// Keep the cursor inside the list after it was replaced
    pub fn clamp_selection(&mut self) {
        let count = self.workflow_count();
        if count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= count {
            self.selected_index = count - 1;
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Last poll error of the view on screen, if any
    pub fn current_poll_error(&self) -> Option<&str> {
        match self.current_view {
            View::Dashboard => self.stats.last_error(),
            View::Workflows => self.workflows.last_error(),
            View::WorkflowDetail => self.workflow_detail.last_error(),
            View::Analytics => self.analytics.last_error(),
            View::NewOnboarding => None,
        }
    }

    /// Drop everything the previous view owned and prepare slots for `view`
    pub fn reset_view_data(&mut self, view: View) {
        self.reset_selection();
        self.confirm_cancel = None;
        self.action_in_flight = false;
        self.wizard = None;
        match view {
            View::Dashboard => self.stats.reset(),
            View::Workflows => self.workflows.reset(),
            View::WorkflowDetail => self.workflow_detail.reset(),
            View::Analytics => self.analytics.reset(),
            View::NewOnboarding => self.wizard = Some(WizardForm::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::state::{WorkflowPriority, WorkflowStatus};
    use pretty_assertions::assert_eq;

    fn summary(id: &str) -> WorkflowSummary {
        WorkflowSummary {
            id: id.to_string(),
            customer_name: Some(format!("Customer {id}")),
            workflow_type: "standard_onboarding".to_string(),
            status: WorkflowStatus::InProgress,
            priority: WorkflowPriority::Normal,
            progress_percentage: 40,
            started_at: None,
            created_at: None,
        }
    }

    fn state_with_workflows(ids: &[&str]) -> AppState {
        let mut state = AppState::default();
        state
            .workflows
            .apply(Ok(ids.iter().map(|id| summary(id)).collect()));
        state
    }

    mod selection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_move_selection_stays_in_bounds() {
            let mut state = AppState::default();
            state.move_selection_up();
            assert_eq!(state.selected_index, 0);

            state.move_selection_down(2);
            state.move_selection_down(2);
            assert_eq!(state.selected_index, 1);

            state.move_selection_down(0);
            assert_eq!(state.selected_index, 1);
        }

        #[test]
        fn test_selected_workflow_clamps_after_shrink() {
            let mut state = state_with_workflows(&["a", "b", "c"]);
            state.selected_index = 2;
            state.workflows.apply(Ok(vec![summary("a")]));

            assert_eq!(state.selected_workflow().map(|w| w.id.as_str()), Some("a"));
            state.clamp_selection();
            assert_eq!(state.selected_index, 0);
        }

        #[test]
        fn test_selected_workflow_none_without_data() {
            let state = AppState::default();
            assert!(state.selected_workflow().is_none());

            let empty = state_with_workflows(&[]);
            assert!(empty.selected_workflow().is_none());
        }
    }

    mod views {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_only_wizard_is_form_view() {
            assert!(View::NewOnboarding.is_form_view());
            assert!(!View::Dashboard.is_form_view());
            assert!(!View::WorkflowDetail.is_form_view());
        }

        #[test]
        fn test_reset_for_wizard_creates_empty_form() {
            let mut state = AppState::default();
            state.reset_view_data(View::NewOnboarding);
            let wizard = state.wizard.as_ref().unwrap();
            assert_eq!(wizard.data().company_name, "");
            assert_eq!(wizard.step().index(), 0);
        }

        #[test]
        fn test_reset_discards_wizard_and_pending_confirm() {
            let mut state = AppState::default();
            state.reset_view_data(View::NewOnboarding);
            state.confirm_cancel = Some("wf_1".to_string());

            state.reset_view_data(View::Workflows);
            assert!(state.wizard.is_none());
            assert!(state.confirm_cancel.is_none());
            assert!(state.workflows.is_loading());
        }

        #[test]
        fn test_poll_error_follows_current_view() {
            let mut state = AppState::default();
            state.stats.apply(Err(ApiError::Timeout));
            assert!(state.current_poll_error().is_some());

            state.current_view = View::Workflows;
            assert!(state.current_poll_error().is_none());
        }

        #[test]
        fn test_analytics_reset_keeps_window() {
            let mut state = AppState {
                analytics_days: 90,
                ..Default::default()
            };
            state.analytics.apply(Ok(AnalyticsReport::default()));
            state.current_view = View::Analytics;
            state.analytics.apply(Err(ApiError::Unavailable));
            assert!(state.current_poll_error().is_some());

            state.reset_view_data(View::Analytics);
            assert!(state.analytics.is_loading());
            assert!(state.analytics.data().is_none());
            assert_eq!(state.analytics_days, 90);
        }
    }

    #[test]
    fn test_status_messages() {
        let mut state = AppState::default();
        state.set_error("Failed to start onboarding");
        assert_eq!(
            state.status_message,
            Some(StatusMessage {
                text: "Failed to start onboarding".to_string(),
                is_error: true,
            })
        );
        state.set_status("Workflow approved");
        assert!(!state.status_message.as_ref().unwrap().is_error);
        state.clear_status();
        assert!(state.status_message.is_none());
    }
}

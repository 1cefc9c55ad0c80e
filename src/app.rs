//! Application state and core logic
//!
//! The app runs on the UI task. Pollers and submissions run as background
//! tasks and report back through an event channel; every event is tagged
//! with the generation of the view that started it, and events from a view
//! that is no longer mounted are dropped.

use crate::api::{self, ApiError, NavTarget, OnboardingApi};
use crate::config::TuiConfig;
use crate::platform::has_wizard_modifier;
use crate::poll::{self, PollHandle};
use crate::state::{
    next_window, window_label, AnalyticsReport, AppState, OnboardingStats, View, ViewParams,
    WizardField, WorkflowDetail, WorkflowSummary,
};
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Human action taken on a workflow from the detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowAction {
    Approve,
    Cancel,
}

impl WorkflowAction {
    fn done_message(&self) -> &'static str {
        match self {
            Self::Approve => "Workflow approved",
            Self::Cancel => "Workflow cancelled",
        }
    }

    fn failed_message(&self) -> &'static str {
        match self {
            Self::Approve => "Failed to approve workflow",
            Self::Cancel => "Failed to cancel workflow",
        }
    }
}

/// Result delivered from a background task
#[derive(Debug)]
pub enum EventKind {
    Stats(Result<OnboardingStats, ApiError>),
    Workflows(Result<Vec<WorkflowSummary>, ApiError>),
    WorkflowDetail(Result<WorkflowDetail, ApiError>),
    Analytics(Result<AnalyticsReport, ApiError>),
    Submitted(Result<NavTarget, ApiError>),
    ActionFinished {
        action: WorkflowAction,
        result: Result<(), ApiError>,
    },
}

#[derive(Debug)]
pub struct AppEvent {
    pub generation: u64,
    pub kind: EventKind,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    api: Arc<dyn OnboardingApi>,
    config: TuiConfig,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Poller of the mounted view
    poller: Option<PollHandle>,
    /// Bumped on every mount
    generation: u64,
    quit: bool,
}

impl App {
    /// Create the app and mount the dashboard
    pub fn new(api: Arc<dyn OnboardingApi>, config: TuiConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let state = AppState {
            analytics_days: config.analytics_days(),
            ..Default::default()
        };
        let mut app = Self {
            state,
            api,
            config,
            events_tx,
            events_rx,
            poller: None,
            generation: 0,
            quit: false,
        };
        app.mount_current_view();
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply every event that has already arrived
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    /// Wait for the next background event
    #[cfg(test)]
    async fn next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.recv().await
    }

    /// Apply one background result if it belongs to the mounted view
    pub fn apply_event(&mut self, event: AppEvent) {
        if event.generation != self.generation {
            tracing::debug!(
                generation = event.generation,
                current = self.generation,
                "Dropping result for unmounted view"
            );
            return;
        }

        match event.kind {
            EventKind::Stats(result) => self.state.stats.apply(result),
            EventKind::Workflows(result) => {
                self.state.workflows.apply(result);
                self.state.clamp_selection();
            }
            EventKind::WorkflowDetail(result) => {
                if result.as_ref().is_err_and(ApiError::is_not_found) {
                    self.state.set_error("Workflow not found");
                }
                self.state.workflow_detail.apply(result);
            }
            EventKind::Analytics(result) => self.state.analytics.apply(result),
            EventKind::Submitted(result) => self.finish_submission(result),
            EventKind::ActionFinished { action, result } => self.finish_action(action, result),
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Cancel confirmation is modal
        if self.state.confirm_cancel.is_some() {
            self.handle_confirm_cancel_key(key);
            return;
        }

        // Clear any status messages on key press
        if !self.is_submitting() {
            self.state.clear_status();
        }

        if !self.state.current_view.is_form_view() && self.handle_global_key(key) {
            return;
        }

        match self.state.current_view {
            View::Dashboard => self.handle_dashboard_key(key),
            View::Workflows => self.handle_workflows_key(key),
            View::WorkflowDetail => self.handle_workflow_detail_key(key),
            View::Analytics => self.handle_analytics_key(key),
            View::NewOnboarding => self.handle_wizard_key(key),
        }
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View, params: ViewParams) {
        self.state.view_history.push((
            self.state.current_view,
            std::mem::take(&mut self.state.view_params),
        ));
        self.state.current_view = view;
        self.state.view_params = params;
        self.mount_current_view();
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        // Skip form views in history to go back to the last non-form view
        while let Some((view, params)) = self.state.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            self.state.current_view = view;
            self.state.view_params = params;
            self.mount_current_view();
            return;
        }
    }

    /// Tear down the previous view and start the current one's poller
    fn mount_current_view(&mut self) {
        self.unmount();
        self.generation += 1;
        self.state.reset_view_data(self.state.current_view);
        tracing::debug!(
            view = self.state.current_view.label(),
            generation = self.generation,
            "View mounted"
        );
        self.start_poller();
    }

    fn unmount(&mut self) {
        if let Some(mut poller) = self.poller.take() {
            poller.cancel();
        }
    }

    /// Restart the current view's poller so it fetches right away.
    /// Data already on screen is kept.
    pub fn refresh(&mut self) {
        if let Some(poller) = &self.poller {
            tracing::debug!(poller = poller.label(), "Manual refresh");
        }
        self.unmount();
        self.start_poller();
    }

    /// True while the mounted view has a running poller
    pub fn is_live(&self) -> bool {
        self.poller.as_ref().is_some_and(PollHandle::is_active)
    }

    fn start_poller(&mut self) {
        let generation = self.generation;
        let tx = self.events_tx.clone();
        let api = Arc::clone(&self.api);

        self.poller = match self.state.current_view {
            View::Dashboard => Some(poll::start(
                "stats",
                self.config.stats_poll_period(),
                move || {
                    let api = Arc::clone(&api);
                    async move { api.get_stats().await }
                },
                move |result| {
                    let _ = tx.send(AppEvent {
                        generation,
                        kind: EventKind::Stats(result),
                    });
                },
            )),
            View::Workflows => Some(poll::start(
                "workflows",
                self.config.list_poll_period(),
                move || {
                    let api = Arc::clone(&api);
                    async move { api.list_workflows().await }
                },
                move |result| {
                    let _ = tx.send(AppEvent {
                        generation,
                        kind: EventKind::Workflows(result),
                    });
                },
            )),
            View::WorkflowDetail => {
                let Some(id) = self.state.view_params.workflow_id.clone() else {
                    tracing::warn!("Workflow detail mounted without an id");
                    return;
                };
                Some(poll::start(
                    "workflow_detail",
                    self.config.detail_poll_period(),
                    move || {
                        let api = Arc::clone(&api);
                        let id = id.clone();
                        async move { api.get_workflow(&id).await }
                    },
                    move |result| {
                        let _ = tx.send(AppEvent {
                            generation,
                            kind: EventKind::WorkflowDetail(result),
                        });
                    },
                ))
            }
            View::Analytics => {
                let days = self.state.analytics_days;
                Some(poll::start(
                    "analytics",
                    self.config.analytics_poll_period(),
                    move || {
                        let api = Arc::clone(&api);
                        async move { api::fetch_report(api.as_ref(), days).await }
                    },
                    move |result| {
                        let _ = tx.send(AppEvent {
                            generation,
                            kind: EventKind::Analytics(result),
                        });
                    },
                ))
            }
            View::NewOnboarding => None,
        };
    }

    fn is_submitting(&self) -> bool {
        self.state.wizard.as_ref().is_some_and(|w| w.is_submitting())
    }

    /// Keys shared by every non-form view. Returns true when handled.
    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('1') if self.state.current_view != View::Dashboard => {
                self.navigate(View::Dashboard, ViewParams::default())
            }
            KeyCode::Char('2') if self.state.current_view != View::Workflows => {
                self.navigate(View::Workflows, ViewParams::default())
            }
            KeyCode::Char('3') if self.state.current_view != View::Analytics => {
                self.navigate(View::Analytics, ViewParams::default())
            }
            KeyCode::Char('n') => self.navigate(View::NewOnboarding, ViewParams::default()),
            KeyCode::Char('r') => self.refresh(),
            _ => return false,
        }
        true
    }

    /// Handle keys in Dashboard view
    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter) {
            self.navigate(View::Workflows, ViewParams::default());
        }
    }

    /// Handle keys in Workflows view
    fn handle_workflows_key(&mut self, key: KeyEvent) {
        let count = self.state.workflow_count();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(count),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Enter => {
                if let Some(id) = self.state.selected_workflow().map(|w| w.id.clone()) {
                    self.navigate(View::WorkflowDetail, ViewParams::workflow(id));
                }
            }
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    /// Handle keys in Workflow detail view
    fn handle_workflow_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Char('a') => self.start_action(WorkflowAction::Approve),
            KeyCode::Char('c') => {
                let detail = self.state.workflow_detail.data();
                if self.state.action_in_flight || !detail.is_some_and(|d| d.can_cancel()) {
                    return;
                }
                self.state.confirm_cancel = self.state.view_params.workflow_id.clone();
            }
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    /// Handle keys in Analytics view
    fn handle_analytics_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Char('d') => {
                self.state.analytics_days = next_window(self.state.analytics_days);
                tracing::info!(days = self.state.analytics_days, "Analytics window changed");
                // Remount so results for the previous window are dropped
                self.mount_current_view();
                self.state.set_status(window_label(self.state.analytics_days));
            }
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    fn handle_confirm_cancel_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.state.confirm_cancel = None;
                self.start_action(WorkflowAction::Cancel);
            }
            KeyCode::Char('n') | KeyCode::Esc => self.state.confirm_cancel = None,
            _ => {}
        }
    }

    /// Handle keys in the new onboarding wizard
    fn handle_wizard_key(&mut self, key: KeyEvent) {
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };

        if has_wizard_modifier(key.modifiers) {
            match key.code {
                KeyCode::Char('n') => self.advance_wizard(),
                KeyCode::Char('b') => {
                    wizard.back();
                }
                KeyCode::Char('s') => self.submit_wizard(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => wizard.next_field(),
            KeyCode::BackTab | KeyCode::Up => wizard.prev_field(),
            KeyCode::Enter if wizard.step().is_last() => self.submit_wizard(),
            KeyCode::Enter => self.advance_wizard(),
            KeyCode::Esc => {
                if wizard.is_submitting() {
                    self.state.set_status("Submission in progress");
                } else {
                    self.go_back();
                }
            }
            KeyCode::Char(c) => wizard.input_char(c),
            KeyCode::Backspace => wizard.backspace(),
            _ => {}
        }
    }

    fn advance_wizard(&mut self) {
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };
        if !wizard.next() && !wizard.errors().is_empty() {
            let invalid: Vec<_> = wizard.errors().keys().map(WizardField::name).collect();
            tracing::debug!(step = wizard.step().title(), ?invalid, "Wizard step incomplete");
        }
    }

    /// Submit the wizard in the background. One attempt per call.
    fn submit_wizard(&mut self) {
        let Some(wizard) = self.state.wizard.as_mut() else {
            return;
        };
        let Some(data) = wizard.begin_submit() else {
            return;
        };
        self.state.set_status("Starting onboarding...");

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = api::submit_wizard(api.as_ref(), &data).await;
            let _ = tx.send(AppEvent {
                generation,
                kind: EventKind::Submitted(result),
            });
        });
    }

    fn finish_submission(&mut self, result: Result<NavTarget, ApiError>) {
        match result {
            Ok(NavTarget::WorkflowDetail(id)) => {
                self.navigate(View::WorkflowDetail, ViewParams::workflow(id));
                self.state.set_status("Onboarding started");
            }
            Ok(NavTarget::WorkflowList) => {
                self.navigate(View::Workflows, ViewParams::default());
                self.state.set_status("Onboarding started");
            }
            Err(_) => {
                if let Some(wizard) = self.state.wizard.as_mut() {
                    wizard.submission_failed();
                }
                self.state
                    .set_error("Failed to start onboarding. Please try again.");
            }
        }
    }

    /// Run an approve or cancel against the workflow on screen
    fn start_action(&mut self, action: WorkflowAction) {
        if self.state.action_in_flight {
            return;
        }
        let Some(detail) = self.state.workflow_detail.data() else {
            return;
        };
        let allowed = match action {
            WorkflowAction::Approve => detail.can_approve(),
            WorkflowAction::Cancel => detail.can_cancel(),
        };
        if !allowed {
            return;
        }
        let Some(id) = self.state.view_params.workflow_id.clone() else {
            return;
        };

        self.state.action_in_flight = true;
        tracing::info!(workflow_id = %id, ?action, "Workflow action requested");

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = match action {
                WorkflowAction::Approve => api.approve_workflow(&id, None).await,
                WorkflowAction::Cancel => api.cancel_workflow(&id).await,
            };
            let _ = tx.send(AppEvent {
                generation,
                kind: EventKind::ActionFinished { action, result },
            });
        });
    }

    fn finish_action(&mut self, action: WorkflowAction, result: Result<(), ApiError>) {
        self.state.action_in_flight = false;
        match result {
            Ok(()) => {
                self.state.set_status(action.done_message());
                self.refresh();
            }
            Err(e) => {
                tracing::error!(error = %e, ?action, "Workflow action failed");
                self.state.set_error(action.failed_message());
            }
        }
    }
}

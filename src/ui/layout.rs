//! Layout components (sidebar, status bar)

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{BACK_STEP_SHORTCUT, NEXT_STEP_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{View, WizardForm};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Sidebar entries: key, label, view
const SIDEBAR_ITEMS: &[(&str, &str, View)] = &[
    ("1", "Dashboard", View::Dashboard),
    ("2", "Workflows", View::Workflows),
    ("3", "Analytics", View::Analytics),
    ("n", "New", View::NewOnboarding),
];

/// Split the screen into sidebar and main content, leaving the last row
/// for the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(rows[0]);

    (columns[0], columns[1])
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(SIDEBAR_ITEMS.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, (key, label, view)) in SIDEBAR_ITEMS.iter().enumerate() {
        let is_selected = sidebar_view(app.state.current_view) == *view;
        render_sidebar_button(frame, chunks[idx + 1], key, label, is_selected);
    }
}

/// Sidebar entry that owns `view`
fn sidebar_view(view: View) -> View {
    match view {
        View::WorkflowDetail => View::Workflows,
        other => other,
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Connection health of the view on screen
    let conn_status = match (app.state.current_poll_error(), app.is_live()) {
        (Some(_), _) => Span::styled(" ○ ", Style::default().fg(Color::Red)),
        (None, true) => Span::styled(" ● ", Style::default().fg(Color::Green)),
        (None, false) => Span::styled(" ● ", Style::default().fg(Color::DarkGray)),
    };
    spans.push(conn_status);

    let hints = get_view_hints(app.state.current_view, app.state.wizard.as_ref());
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.state.status_message {
        let color = if msg.is_error { Color::Red } else { Color::Green };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.text.as_str(), Style::default().fg(color)));
    } else if let Some(err) = app.state.current_poll_error() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("refresh failed: {err}"),
            Style::default().fg(Color::Yellow),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View, wizard: Option<&WizardForm>) -> String {
    match view {
        View::Dashboard => "Enter:workflows  n:new  r:refresh  q:quit".to_string(),
        View::Workflows => "j/k:nav  Enter:open  n:new  r:refresh  Esc:back".to_string(),
        View::WorkflowDetail => "a:approve  c:cancel  j/k:scroll  r:refresh  Esc:back".to_string(),
        View::Analytics => "d:period  j/k:scroll  r:refresh  Esc:back".to_string(),
        View::NewOnboarding => wizard_hints(wizard),
    }
}

fn wizard_hints(wizard: Option<&WizardForm>) -> String {
    let Some(wizard) = wizard else {
        return String::new();
    };
    if wizard.is_submitting() {
        return "Submitting...".to_string();
    }

    let mut hints = vec!["Tab:field".to_string()];
    if wizard.can_go_back() {
        hints.push(format!("{BACK_STEP_SHORTCUT}:back"));
    }
    if wizard.can_advance() {
        hints.push(format!("{NEXT_STEP_SHORTCUT}:next"));
    }
    if wizard.can_submit() {
        hints.push(format!("{SUBMIT_SHORTCUT}:submit"));
    }
    hints.push("Esc:leave".to_string());
    hints.join("  ")
}

//! Confirmation dialog for cancelling a workflow

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Style},
    text::Span,
    Frame,
};

/// Ask before cancelling; `subject` names the workflow
pub fn render_confirm_dialog(frame: &mut Frame, subject: &str) {
    let message = format!(
        "Cancel the onboarding workflow for {subject}?\nRunning steps are stopped and cannot be resumed."
    );
    let key = Style::default().fg(Color::Cyan);
    let dim = Style::default().fg(Color::DarkGray);

    render_dialog(
        frame,
        DialogConfig {
            title: "Cancel Workflow",
            accent: Color::Red,
            message: &message,
            hint: Some(vec![
                Span::styled("y", key),
                Span::styled(" cancel workflow  ", dim),
                Span::styled("n/Esc", key),
                Span::styled(" keep running", dim),
            ]),
            max_width: 56,
        },
    );
}

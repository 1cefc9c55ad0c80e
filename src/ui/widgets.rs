//! Reusable UI widget helpers

use crate::state::{StepStatus, WorkflowStatus};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::Color,
    widgets::{List, ListState},
    Frame,
};

/// Render a list that scrolls to keep the selected item visible.
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Whole minutes as "45m", "2h" or "2h 5m"
pub fn format_duration(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{hours}h")
    }
}

/// "█████░░░░░" filled to `percent` of `width` cells
pub fn text_bar(percent: f64, width: usize) -> String {
    let ratio = if percent.is_finite() {
        percent.clamp(0.0, 100.0) / 100.0
    } else {
        0.0
    };
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Fractional minutes from the API, shown like [`format_duration`]
pub fn format_minutes(minutes: f64) -> String {
    format_duration(minutes.max(0.0).round() as u64)
}

/// Step runtime; sub-minute durations keep one decimal
pub fn format_step_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{seconds:.1}s")
    } else {
        format_duration((seconds / 60.0).round() as u64)
    }
}

/// "Oct 16, 2026"
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// "3:05 PM"
pub fn format_time(at: DateTime<Utc>) -> String {
    at.format("%-I:%M %p").to_string()
}

pub fn status_color(status: WorkflowStatus) -> Color {
    match status {
        WorkflowStatus::Pending => Color::Yellow,
        WorkflowStatus::InProgress => Color::Blue,
        WorkflowStatus::AwaitingInput | WorkflowStatus::AwaitingApproval => Color::Magenta,
        WorkflowStatus::Approved | WorkflowStatus::Completed => Color::Green,
        WorkflowStatus::Failed => Color::Red,
        WorkflowStatus::Cancelled => Color::DarkGray,
    }
}

pub fn step_color(status: StepStatus) -> Color {
    match status {
        StepStatus::Pending => Color::DarkGray,
        StepStatus::InProgress => Color::Blue,
        StepStatus::Completed => Color::Green,
        StepStatus::Failed => Color::Red,
    }
}

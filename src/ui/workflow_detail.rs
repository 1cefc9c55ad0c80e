//! Workflow detail view: summary, step timeline and actions

use super::components::render_confirm_dialog;
use super::widgets::{format_date, format_step_duration, format_time, status_color, step_color};
use crate::app::App;
use crate::state::{WorkflowDetail, WorkflowStep};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Draw the workflow detail
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let id = app.state.view_params.workflow_id.as_deref().unwrap_or("?");

    let Some(detail) = app.state.workflow_detail.data() else {
        let message = if app.state.workflow_detail.is_loading() {
            "Loading workflow..."
        } else {
            "Workflow not found or unavailable. Press 'r' to retry, Esc to go back."
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title(format!(" Workflow {id} "))
                    .borders(Borders::ALL),
            );
        frame.render_widget(content, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Timeline
            Constraint::Length(1), // Actions
        ])
        .split(area);

    draw_summary(frame, chunks[0], detail);
    draw_progress(frame, chunks[1], detail);
    draw_timeline(frame, chunks[2], detail, app.state.scroll_offset);
    draw_actions(frame, chunks[3], detail, app.state.action_in_flight);

    if app.state.confirm_cancel.is_some() {
        render_confirm_dialog(frame, detail.summary.display_name());
    }
}

fn draw_summary(frame: &mut Frame, area: Rect, detail: &WorkflowDetail) {
    let summary = &detail.summary;
    let label = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                summary.display_name(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", summary.status.label()),
                Style::default().fg(status_color(summary.status)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Type: ", label),
            Span::raw(summary.workflow_type.as_str()),
            Span::styled("  Priority: ", label),
            Span::raw(summary.priority.label()),
        ]),
        Line::from(vec![
            Span::styled("Current step: ", label),
            Span::raw(detail.current_step.as_deref().unwrap_or("-")),
        ]),
    ];

    if let Some(started) = summary.started_at {
        lines.push(Line::from(vec![
            Span::styled("Started: ", label),
            Span::raw(format!("{} {}", format_date(started), format_time(started))),
        ]));
    }

    if let Some(error) = &detail.error_message {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }

    let content = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(format!(" Workflow {} ", summary.id))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(content, area);
}

fn draw_progress(frame: &mut Frame, area: Rect, detail: &WorkflowDetail) {
    let percent = detail.summary.progress();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(status_color(detail.summary.status)))
        .percent(percent)
        .label(format!(
            "{percent}%  ({}/{} steps)",
            detail.completed_steps, detail.total_steps
        ));
    frame.render_widget(gauge, area);
}

fn draw_timeline(frame: &mut Frame, area: Rect, detail: &WorkflowDetail, scroll: usize) {
    let timeline = detail.timeline();

    let lines: Vec<Line> = if timeline.is_empty() {
        vec![Line::from(Span::styled(
            "No steps recorded yet.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        timeline.into_iter().flat_map(step_lines).collect()
    };

    let content = Paragraph::new(lines)
        .scroll((scroll.min(u16::MAX as usize) as u16, 0))
        .block(
            Block::default()
                .title(" Timeline ")
                .borders(Borders::ALL),
        );
    frame.render_widget(content, area);
}

fn step_lines<'a>(step: &'a WorkflowStep) -> Vec<Line<'a>> {
    let color = step_color(step.status);
    let dim = Style::default().fg(Color::DarkGray);
    let mut header = vec![
        Span::styled(format!("{} ", step.status.symbol()), Style::default().fg(color)),
        Span::raw(step.step_name.as_str()),
        Span::styled(
            format!("  [{}]", step.status.label()),
            Style::default().fg(color),
        ),
    ];
    if !step.step_type.is_empty() {
        header.push(Span::styled(format!("  {}", step.step_type), dim));
    }
    if let Some(agent) = &step.agent_name {
        header.push(Span::styled(format!("  by {agent}"), dim));
    }
    if let Some(seconds) = step.duration_seconds {
        header.push(Span::styled(
            format!("  {}", format_step_duration(seconds)),
            dim,
        ));
    }

    let mut lines = vec![
        Line::from(header),
        Line::from(Span::styled(format!("    {}", step_detail(step)), dim)),
    ];
    if let Some(error) = &step.error_message {
        lines.push(Line::from(Span::styled(
            format!("    {error}"),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

/// Caption plus start and finish times when the API reported them
fn step_detail(step: &WorkflowStep) -> String {
    let mut parts = vec![step.status.caption().to_string()];
    if let Some(at) = step.started_at {
        parts.push(format!("started {}", format_time(at)));
    }
    if let Some(at) = step.completed_at {
        parts.push(format!("finished {}", format_time(at)));
    }
    parts.join(" · ")
}

fn draw_actions(frame: &mut Frame, area: Rect, detail: &WorkflowDetail, busy: bool) {
    let key = |enabled: bool| {
        if enabled && !busy {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let mut spans = vec![
        Span::styled(" [a] Approve", key(detail.can_approve())),
        Span::raw("   "),
        Span::styled("[c] Cancel", key(detail.can_cancel())),
    ];
    if busy {
        spans.push(Span::styled(
            "   working...",
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StepStatus;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn step(status: StepStatus) -> WorkflowStep {
        WorkflowStep {
            step_name: "kyc_check".to_string(),
            step_type: "verification".to_string(),
            sequence_order: 1,
            agent_name: None,
            status,
            started_at: None,
            completed_at: None,
            duration_seconds: None,
            error_message: None,
        }
    }

    #[test]
    fn test_step_detail_includes_times() {
        let mut done = step(StepStatus::Completed);
        done.started_at = Some(Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap());
        done.completed_at = Some(Utc.with_ymd_and_hms(2026, 10, 16, 9, 4, 0).unwrap());
        assert_eq!(
            step_detail(&done),
            "Task executed successfully · started 9:00 AM · finished 9:04 AM"
        );
        assert_eq!(step_detail(&step(StepStatus::Pending)), "Waiting for previous steps");
    }

    #[test]
    fn test_step_header_shows_label_and_type() {
        let running = step(StepStatus::InProgress);
        let lines = step_lines(&running);
        let header: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(header.contains("[In Progress]"));
        assert!(header.contains("verification"));
        assert_eq!(lines.len(), 2);
    }
}

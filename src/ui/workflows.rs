//! Workflow list view

use super::widgets::{format_date, render_scrollable_list, status_color, text_bar};
use crate::app::App;
use crate::state::WorkflowSummary;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Width of the text progress bar
const BAR_WIDTH: usize = 10;

/// Draw the workflows list
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let workflows = app.state.workflows.data();
    let total = workflows.map_or(0, Vec::len);

    let block = Block::default()
        .title(format!(" Workflows ({total}) "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(workflows) = workflows.filter(|w| !w.is_empty()) else {
        let message = if app.state.workflows.is_loading() {
            "Loading workflows..."
        } else if app.state.workflows.last_error().is_some() {
            "Could not load workflows. Press 'r' to retry."
        } else {
            "No onboarding workflows yet.\nPress 'n' to start one."
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    };

    let selected = app.state.selected_index.min(workflows.len() - 1);
    let items: Vec<ListItem> = workflows
        .iter()
        .enumerate()
        .map(|(idx, workflow)| ListItem::new(workflow_line(workflow, idx == selected)))
        .collect();

    let list = List::new(items).block(block);
    render_scrollable_list(frame, area, list, selected);
}

fn workflow_line(workflow: &WorkflowSummary, is_selected: bool) -> Line<'_> {
    let prefix = if is_selected { "▸ " } else { "  " };
    let style = if is_selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    let created = workflow
        .created_at
        .map(format_date)
        .unwrap_or_default();

    Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(
            format!("{:<18}", format!("[{}]", workflow.status.label())),
            Style::default().fg(status_color(workflow.status)),
        ),
        Span::raw(" "),
        Span::styled(progress_bar(workflow.progress()), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!(" {:>3}% ", workflow.progress()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(workflow.display_name(), style),
        Span::styled(
            format!("  {}  {}", workflow.workflow_type, created),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn progress_bar(percent: u16) -> String {
    text_bar(f64::from(percent), BAR_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0), "░░░░░░░░░░");
        assert_eq!(progress_bar(50), "█████░░░░░");
        assert_eq!(progress_bar(100), "██████████");
        assert_eq!(progress_bar(250), "██████████");
    }

    #[test]
    fn test_progress_bar_rounds() {
        assert_eq!(progress_bar(4).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(progress_bar(5).chars().filter(|c| *c == '█').count(), 1);
    }
}

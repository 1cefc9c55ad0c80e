//! Dashboard home: headline onboarding numbers

use super::widgets::format_minutes;
use crate::app::App;
use crate::state::OnboardingStats;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draw the dashboard
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Onboarding Dashboard ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(stats) = app.state.stats.data() else {
        let message = if app.state.stats.is_loading() {
            "Loading statistics..."
        } else {
            "Statistics unavailable. Press 'r' to retry."
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Cards
            Constraint::Length(3), // Success rate
            Constraint::Min(0),
        ])
        .split(inner);

    draw_cards(frame, rows[0], stats);

    let rate = stats.success_rate.clamp(0.0, 100.0);
    let gauge = Gauge::default()
        .block(Block::default().title(" Success Rate ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(rate / 100.0)
        .label(format!("{rate:.1}%"));
    frame.render_widget(gauge, rows[1]);

    if let Some(at) = app.state.stats.refreshed_at() {
        let footer = Paragraph::new(format!(" Updated {}", at.format("%H:%M:%S")))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, rows[2]);
    }
}

fn draw_cards(frame: &mut Frame, area: Rect, stats: &OnboardingStats) {
    let cards = [
        ("Total", stats.total_workflows.to_string(), Color::White),
        ("Active", stats.active_workflows.to_string(), Color::Blue),
        ("Done Today", stats.completed_today.to_string(), Color::Green),
        (
            "Avg Time",
            format_minutes(stats.avg_completion_time_minutes),
            Color::Cyan,
        ),
        (
            "Approvals",
            stats.pending_approvals.to_string(),
            if stats.pending_approvals > 0 {
                Color::Magenta
            } else {
                Color::DarkGray
            },
        ),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(cards.iter().map(|_| Constraint::Ratio(1, cards.len() as u32)))
        .split(area);

    for ((title, value, color), column) in cards.into_iter().zip(columns.iter()) {
        let card = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(card, *column);
    }
}

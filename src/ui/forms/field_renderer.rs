//! Field rendering utilities for the wizard

use crate::state::{Tier, WizardField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one text field
pub const FIELD_HEIGHT: u16 = 3;

/// Rows taken by the tier choice
pub const CHOICE_HEIGHT: u16 = 4;

/// Draw a text field. The validation error, if any, sits on the bottom border.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: WizardField,
    value: &str,
    error: Option<&str>,
    is_active: bool,
) {
    let border_color = match (error.is_some(), is_active) {
        (true, _) => Color::Red,
        (false, true) => Color::Cyan,
        (false, false) => Color::DarkGray,
    };

    let mut spans = if value.is_empty() && !is_active {
        vec![Span::styled(
            field.placeholder(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        vec![Span::raw(value)]
    };
    if is_active {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let mut block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    if let Some(message) = error {
        block = block.title_bottom(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Draw the tier choice as a pair of radio options
pub fn draw_tier_choice(frame: &mut Frame, area: Rect, selected: Tier, is_active: bool) {
    let lines: Vec<Line> = [Tier::Standard, Tier::Enterprise]
        .into_iter()
        .map(|tier| {
            let chosen = tier == selected;
            let marker = if chosen { "(•) " } else { "( ) " };
            let style = if chosen {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(marker, style),
                Span::styled(tier.label(), style),
                Span::styled(
                    format!("  {}", tier.description()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let border_color = if is_active { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .title(format!(" {} (Space to switch) ", WizardField::Tier.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

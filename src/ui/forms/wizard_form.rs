//! New onboarding wizard view

use super::field_renderer::{draw_field, draw_tier_choice, CHOICE_HEIGHT, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{WizardField, WizardForm, WizardStep};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Where a step sits relative to the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepState {
    Done,
    Current,
    Upcoming,
}

fn step_state(step: WizardStep, current: WizardStep) -> StepState {
    match step.index().cmp(&current.index()) {
        std::cmp::Ordering::Less => StepState::Done,
        std::cmp::Ordering::Equal => StepState::Current,
        std::cmp::Ordering::Greater => StepState::Upcoming,
    }
}

/// Draw the wizard
pub fn draw_wizard(frame: &mut Frame, area: Rect, app: &App) {
    let Some(wizard) = app.state.wizard.as_ref() else {
        return;
    };

    let block = Block::default()
        .title(" Create New Onboarding ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Stepper
            Constraint::Length(3),             // Step heading
            Constraint::Min(0),                // Fields
            Constraint::Length(BUTTON_HEIGHT), // Navigation
        ])
        .split(inner);

    draw_stepper(frame, chunks[0], wizard.step());
    draw_heading(frame, chunks[1], wizard.step());

    match wizard.step() {
        WizardStep::Review => draw_review(frame, chunks[2], wizard),
        _ => draw_fields(frame, chunks[2], wizard),
    }

    draw_navigation(frame, chunks[3], wizard);
}

fn draw_stepper(frame: &mut Frame, area: Rect, current: WizardStep) {
    let mut spans = Vec::new();
    for (idx, step) in WizardStep::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" ─ ", Style::default().fg(Color::DarkGray)));
        }
        let (marker, style) = match step_state(*step, current) {
            StepState::Done => ("✓".to_string(), Style::default().fg(Color::Green)),
            StepState::Current => (
                (idx + 1).to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            StepState::Upcoming => ((idx + 1).to_string(), Style::default().fg(Color::DarkGray)),
        };
        spans.push(Span::styled(format!("{marker} {}", step.title()), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_heading(frame: &mut Frame, area: Rect, step: WizardStep) {
    let lines = vec![
        Line::from(Span::styled(
            format!("Step {} of {}: {}", step.index() + 1, WizardStep::ALL.len(), step.title()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            step.description(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_fields(frame: &mut Frame, area: Rect, wizard: &WizardForm) {
    let fields = wizard.step().fields();
    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|f| {
            Constraint::Length(if f.is_choice() {
                CHOICE_HEIGHT
            } else {
                FIELD_HEIGHT
            })
        })
        .collect();
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let active = wizard.active_field();
    for (field, row) in fields.iter().zip(rows.iter()) {
        let is_active = active == Some(*field);
        if field.is_choice() {
            draw_tier_choice(frame, *row, wizard.data().tier, is_active);
        } else {
            draw_field(
                frame,
                *row,
                *field,
                wizard.data().text(*field),
                wizard.error_for(*field),
                is_active,
            );
        }
    }
}

fn draw_review(frame: &mut Frame, area: Rect, wizard: &WizardForm) {
    let data = wizard.data();
    let label = Style::default().fg(Color::DarkGray);

    let mut lines: Vec<Line> = [
        WizardField::CompanyName,
        WizardField::TaxId,
        WizardField::ContactName,
        WizardField::Email,
    ]
    .into_iter()
    .map(|field| {
        Line::from(vec![
            Span::styled(format!("{:<30}", field.label()), label),
            Span::raw(data.text(field).trim().to_string()),
        ])
    })
    .collect();

    lines.push(Line::from(vec![
        Span::styled(format!("{:<30}", WizardField::Tier.label()), label),
        Span::styled(
            data.tier.label(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", data.tier.description()), label),
    ]));

    let content = Paragraph::new(lines).block(
        Block::default()
            .title(" Summary ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(content, area);
}

fn draw_navigation(frame: &mut Frame, area: Rect, wizard: &WizardForm) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14),
            Constraint::Min(0),
            Constraint::Length(18),
        ])
        .split(area);

    render_button(frame, columns[0], "Back", false, wizard.can_go_back());

    if wizard.step().is_last() {
        let label = if wizard.is_submitting() {
            "Submitting..."
        } else {
            "Submit"
        };
        render_button(frame, columns[2], label, true, wizard.can_submit());
    } else {
        render_button(frame, columns[2], "Next", true, wizard.can_advance());
    }
}

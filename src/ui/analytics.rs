//! Analytics view: KPIs, breakdowns and step performance for a reporting window

use super::widgets::{format_minutes, status_color, text_bar};
use crate::app::App;
use crate::state::{window_label, AnalyticsReport, AnalyticsSummary, StepMetric};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Row, Table},
    Frame,
};

/// Width of the share bars in the breakdown panels
const SHARE_BAR_WIDTH: usize = 12;

/// Rows shown per breakdown panel
const BREAKDOWN_ROWS: u16 = 6;

/// Draw the analytics view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(
            " Analytics · {} ",
            window_label(app.state.analytics_days)
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(report) = app.state.analytics.data() else {
        let message = if app.state.analytics.is_loading() {
            "Loading analytics..."
        } else {
            "Analytics unavailable. Press 'r' to retry."
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
            Constraint::Length(4),                  // KPI cards
            Constraint::Length(3),                  // Rates
            Constraint::Length(BREAKDOWN_ROWS + 2), // Breakdowns
            Constraint::Min(0),                     // Steps
            Constraint::Length(1),                  // Footer
        ])
        .split(inner);

    draw_cards(frame, rows[0], &report.summary);
    draw_rates(frame, rows[1], &report.summary);
    draw_breakdowns(frame, rows[2], report);
    draw_steps(frame, rows[3], report, app.state.scroll_offset);

    if let Some(generated) = &report.summary.generated_at {
        let footer = Paragraph::new(format!(" Data generated at {generated}"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, rows[4]);
    }
}

fn draw_cards(frame: &mut Frame, area: Rect, summary: &AnalyticsSummary) {
    let cards = [
        ("Total", summary.total_workflows.to_string(), Color::White),
        ("Completed", summary.completed_workflows.to_string(), Color::Green),
        ("In Progress", summary.in_progress_workflows.to_string(), Color::Blue),
        ("Failed", summary.failed_workflows.to_string(), Color::Red),
        (
            "Approvals",
            summary.pending_approval_workflows.to_string(),
            Color::Magenta,
        ),
        (
            "Avg Time",
            format_minutes(summary.avg_completion_minutes),
            Color::Cyan,
        ),
        (
            "Customers",
            summary.total_customers_onboarded.to_string(),
            Color::White,
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

fn draw_rates(frame: &mut Frame, area: Rect, summary: &AnalyticsSummary) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    let rates = [
        (" Success Rate ", summary.success_rate, Color::Green),
        (" Failure Rate ", summary.failure_rate, Color::Red),
    ];
    for ((title, rate, color), column) in rates.into_iter().zip(columns.iter()) {
        let rate = rate.clamp(0.0, 100.0);
        let gauge = Gauge::default()
            .block(Block::default().title(title).borders(Borders::ALL))
            .gauge_style(Style::default().fg(color))
            .ratio(rate / 100.0)
            .label(format!("{rate:.1}%"));
        frame.render_widget(gauge, *column);
    }
}

fn draw_breakdowns(frame: &mut Frame, area: Rect, report: &AnalyticsReport) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    let status_lines: Vec<Line> = report
        .statuses_by_count()
        .into_iter()
        .take(BREAKDOWN_ROWS as usize)
        .map(|share| {
            let color = status_color(share.status);
            share_line(share.status.label(), share.count, share.percentage, color)
        })
        .collect();
    draw_panel(frame, columns[0], " By Status ", status_lines);

    let type_lines: Vec<Line> = report
        .types_by_count()
        .into_iter()
        .take(BREAKDOWN_ROWS as usize)
        .map(|share| {
            let mut line = share_line(
                &share.workflow_type,
                share.count,
                share.percentage,
                Color::Cyan,
            );
            line.spans.push(Span::styled(
                format!("  ~{}", format_minutes(share.avg_duration_minutes)),
                Style::default().fg(Color::DarkGray),
            ));
            line
        })
        .collect();
    draw_panel(frame, columns[1], " By Type ", type_lines);
}

fn draw_panel(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let lines = if lines.is_empty() {
        vec![Line::from(Span::styled(
            "No workflows in this period.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        lines
    };
    let content = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(content, area);
}

/// "Completed          ████████░░░░   12  60.0%"
fn share_line(label: &str, count: u64, percentage: f64, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{label:<22} ")),
        Span::styled(
            text_bar(percentage, SHARE_BAR_WIDTH),
            Style::default().fg(color),
        ),
        Span::raw(format!(" {count:>5}")),
        Span::styled(
            format!(" {percentage:>5.1}%"),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn draw_steps(frame: &mut Frame, area: Rect, report: &AnalyticsReport, scroll: usize) {
    let weakest = report.weakest_step().map(|s| s.step_name.as_str());
    let title = match weakest {
        Some(name) => format!(" Step Performance · lowest success: {name} "),
        None => " Step Performance ".to_string(),
    };

    let header = Row::new(["Step", "Runs", "OK", "Failed", "Success", "Avg"])
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let skip = scroll.min(report.steps.len().saturating_sub(1));
    let rows: Vec<Row> = report
        .steps
        .iter()
        .skip(skip)
        .map(|step| step_row(step, weakest == Some(step.step_name.as_str())))
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn step_row(step: &StepMetric, is_weakest: bool) -> Row<'static> {
    let rate_color = if step.success_rate >= 90.0 {
        Color::Green
    } else if step.success_rate >= 70.0 {
        Color::Yellow
    } else {
        Color::Red
    };
    let name_style = if is_weakest {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    Row::new(vec![
        Span::styled(step.step_name.clone(), name_style),
        Span::raw(step.total_executions.to_string()),
        Span::raw(step.successful_executions.to_string()),
        Span::raw(step.failed_executions.to_string()),
        Span::styled(
            format!("{:.1}%", step.success_rate),
            Style::default().fg(rate_color),
        ),
        Span::raw(format_minutes(step.avg_duration_minutes)),
    ])
}

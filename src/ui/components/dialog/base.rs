//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    /// Title and border color
    pub accent: Color,
    /// Message content, may contain \n
    pub message: &'a str,
    /// Key hints on the last line
    pub hint: Option<Vec<Span<'a>>>,
    pub max_width: u16,
}

impl Default for DialogConfig<'_> {
    fn default() -> Self {
        Self {
            title: "Dialog",
            accent: Color::White,
            message: "",
            hint: None,
            max_width: 60,
        }
    }
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    // 2 chars padding on each side
    let padding = 4u16;
    let wrapped_lines = wrap_text(
        config.message,
        config.max_width.saturating_sub(padding + 2) as usize,
    );

    let content_width = wrapped_lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(config.title.chars().count()))
        .max()
        .unwrap_or(0) as u16;
    let width = (content_width + padding + 2).min(config.max_width);

    // title + blank + message + (blank + hint) + borders
    let hint_lines = if config.hint.is_some() { 2 } else { 0 };
    let height = (2 + wrapped_lines.len() as u16 + hint_lines + 2).max(5);

    let dialog_area = centered(frame.area(), width, height);
    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(wrapped_lines.into_iter().map(Line::from));

    if let Some(hint_spans) = config.hint {
        content.push(Line::from(""));
        content.push(Line::from(hint_spans));
    }

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(config.accent)),
        )
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, dialog_area);
}

/// A `width` x `height` rect centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Word-wrap to `max_width` columns. Words longer than a line are kept whole.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = current.chars().count() + word.chars().count() + 1;
            if needed > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }

    lines
}

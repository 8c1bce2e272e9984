//! Shared layout for message dialogs (errors, notices)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

/// Horizontal padding inside the border, per side
const PADDING_X: u16 = 2;
/// Cells taken by border and padding across the width
const CHROME_WIDTH: u16 = 2 * PADDING_X + 2;
/// Cells taken by the border across the height
const CHROME_HEIGHT: u16 = 2;

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    pub title_color: Color,
    pub border_color: Color,
    /// Message content (can be multi-line with \n)
    pub message: &'a str,
    /// Key hint shown under the message
    pub hint: Option<Vec<Span<'a>>>,
    /// Widest the dialog may grow on a large terminal
    pub max_width: u16,
}

impl<'a> Default for DialogConfig<'a> {
    fn default() -> Self {
        Self {
            title: "Dialog",
            title_color: Color::White,
            border_color: Color::White,
            message: "",
            hint: None,
            max_width: 60,
        }
    }
}

/// Render a dialog centred on the frame.
///
/// The dialog never extends past the frame: on a terminal smaller than
/// its content it is shrunk and the content clipped.
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let area = frame.area();
    let width_limit = config.max_width.min(area.width);
    let text_width = width_limit.saturating_sub(CHROME_WIDTH).max(1) as usize;

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.title_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(wrap_text(config.message, text_width).into_iter().map(Line::from));
    if let Some(hint_spans) = config.hint {
        content.push(Line::from(""));
        content.push(Line::from(hint_spans));
    }

    let content_width = content.iter().map(Line::width).max().unwrap_or(0);
    let content_height = content.len();
    let dialog_area = centered_rect(
        area,
        saturating_u16(content_width).saturating_add(CHROME_WIDTH),
        saturating_u16(content_height).saturating_add(CHROME_HEIGHT),
    );
    if dialog_area.is_empty() {
        return;
    }

    frame.render_widget(Clear, dialog_area);

    let dialog = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(config.border_color))
                .padding(Padding::horizontal(PADDING_X)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, dialog_area);
}

/// A `width` x `height` rect centred in `area`, shrunk to fit inside it
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn saturating_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Wrap text on word boundaries to fit within `max_width` chars
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.chars().count();
            if current_width > 0 && current_width + 1 + word_width > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
        lines.push(current);
    }

    lines
}

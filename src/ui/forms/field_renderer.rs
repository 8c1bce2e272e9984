//! Field rendering utilities for forms

use crate::state::TextInput;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

fn border_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn field_block(label: &str, is_active: bool) -> Block<'_> {
    Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style(is_active))
}

/// Draw a text input with its cursor and selection
pub fn draw_input(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    input: &TextInput,
    is_active: bool,
    hint: &str,
) {
    let block = field_block(label, is_active);

    if input.is_empty() && !is_active {
        let placeholder = Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let inner = block.inner(area);
    let rows = styled_lines(input, is_active, inner.width as usize);
    let scroll = scroll_offset(rows.cursor_row, inner.height);
    frame.render_widget(
        Paragraph::new(rows.lines).scroll((scroll, 0)).block(block),
        area,
    );
}

/// Input text laid out into screen rows
struct InputRows {
    lines: Vec<Line<'static>>,
    /// Row holding the cursor glyph, if one is drawn
    cursor_row: Option<usize>,
}

/// Lay the input out into rows at most `width` cells wide, marking
/// selection and cursor
fn styled_lines(input: &TextInput, is_active: bool, width: usize) -> InputRows {
    let base = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let selected = base.add_modifier(Modifier::REVERSED);
    // An unfocused input that remembers its cursor shows it dimmed
    let show_cursor = is_active || input.has_cursor();
    let cursor_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let selection = input.selection().filter(|r| !r.is_empty());

    let mut rows = RowBuilder::new(width, base);
    for (idx, c) in input.text().chars().enumerate() {
        if show_cursor && idx == input.cursor() {
            rows.push_cursor(cursor_style);
        }
        if c == '\n' {
            rows.break_line();
            continue;
        }
        let in_selection = selection.as_ref().is_some_and(|r| r.contains(&idx));
        rows.push_char(c, if in_selection { selected } else { base });
    }
    if show_cursor && input.cursor() >= input.len_chars() {
        rows.push_cursor(cursor_style);
    }
    rows.finish()
}

/// Accumulates styled chars into rows, breaking when a row is full
struct RowBuilder {
    width: usize,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    run: String,
    run_style: Style,
    row_width: usize,
    cursor_row: Option<usize>,
}

impl RowBuilder {
    fn new(width: usize, style: Style) -> Self {
        Self {
            width: width.max(1),
            lines: Vec::new(),
            spans: Vec::new(),
            run: String::new(),
            run_style: style,
            row_width: 0,
            cursor_row: None,
        }
    }

    fn flush_run(&mut self) {
        if !self.run.is_empty() {
            self.spans
                .push(Span::styled(std::mem::take(&mut self.run), self.run_style));
        }
    }

    fn break_line(&mut self) {
        self.flush_run();
        self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        self.row_width = 0;
    }

    fn make_room(&mut self, cells: usize) {
        if self.row_width > 0 && self.row_width + cells > self.width {
            self.break_line();
        }
    }

    fn push_char(&mut self, c: char, style: Style) {
        let mut buf = [0u8; 4];
        let cells = Span::raw(&*c.encode_utf8(&mut buf)).width();
        self.make_room(cells);
        if style != self.run_style {
            self.flush_run();
            self.run_style = style;
        }
        self.run.push(c);
        self.row_width += cells;
    }

    fn push_cursor(&mut self, style: Style) {
        self.make_room(1);
        self.flush_run();
        self.spans.push(Span::styled(CURSOR, style));
        self.cursor_row = Some(self.lines.len());
        self.row_width += 1;
    }

    fn finish(mut self) -> InputRows {
        self.break_line();
        InputRows {
            lines: self.lines,
            cursor_row: self.cursor_row,
        }
    }
}

/// First row to show so that the cursor row fits in `visible` rows
fn scroll_offset(cursor_row: Option<usize>, visible: u16) -> u16 {
    let row = u16::try_from(cursor_row.unwrap_or(0)).unwrap_or(u16::MAX);
    row.saturating_sub(visible.saturating_sub(1))
}

/// Draw a row of removable chips
pub fn draw_chips(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    chips: &[String],
    selected: usize,
    is_active: bool,
) {
    let block = field_block(label, is_active);

    if chips.is_empty() {
        let empty = Paragraph::new(Span::styled("(none)", Style::default().fg(Color::DarkGray)))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let mut spans = Vec::new();
    for (idx, chip) in chips.iter().enumerate() {
        let style = if is_active && idx == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        spans.push(Span::styled(format!(" {chip} × "), style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

/// Draw the suggestion dropdown under the tag input
pub fn draw_suggestions(
    frame: &mut Frame,
    area: Rect,
    suggestions: &[String],
    highlighted: Option<usize>,
) {
    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|s| ListItem::new(s.as_str()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default().with_selected(highlighted);
    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw a checkbox row
pub fn draw_checkbox(frame: &mut Frame, area: Rect, label: &str, checked: bool, is_active: bool) {
    let mark = if checked { "[x]" } else { "[ ]" };
    let mark_style = if checked {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let content = Line::from(vec![
        Span::styled(mark, mark_style),
        Span::raw(" "),
        Span::raw(label.to_string()),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(is_active));
    frame.render_widget(Paragraph::new(content).block(block), area);
}

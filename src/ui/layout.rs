//! Layout components (content area, status bar)

use crate::app::App;
use crate::state::{ComposeField, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create full-width layout, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::raw(" ")];

    // View-specific hints
    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view and focus
fn get_view_hints(app: &App) -> String {
    let submit = crate::platform::SUBMIT_SHORTCUT;
    match app.state.current_view {
        View::Home => "n:new form  q:quit".to_string(),
        View::Compose => match app.state.compose.active() {
            ComposeField::TagInput => {
                format!("↑↓:suggestion  Enter:add  Esc:close  Tab:next  {submit}:submit")
            }
            ComposeField::TagList => "←→:select  x/Del:remove  Tab:next".to_string(),
            ComposeField::PlaceholderInput => "Enter:add  Tab:next".to_string(),
            ComposeField::PlaceholderList => {
                "←→:select  Enter:insert into form  x/Del:remove  Tab:next".to_string()
            }
            ComposeField::Body => {
                format!("↑↓←→:move  Shift:select  Enter:newline  Tab:next  {submit}:submit")
            }
            ComposeField::EmailVisible => "Space:toggle  Tab:next".to_string(),
            ComposeField::Submit => "Enter:submit  Esc:discard".to_string(),
            _ => format!("Tab:next  {submit}:submit  Esc:discard"),
        },
    }
}

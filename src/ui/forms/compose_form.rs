//! Compose page rendering

use super::field_renderer::{draw_checkbox, draw_chips, draw_input, draw_suggestions};
use crate::app::App;
use crate::state::placeholder::marker_count;
use crate::state::ComposeField;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Most suggestion rows shown before the dropdown scrolls
const MAX_SUGGESTION_ROWS: u16 = 5;

/// Draw the compose page: metadata on the left, body and author on the right
pub fn draw_compose(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Write a New Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(inner);

    draw_metadata_column(frame, columns[0], app);
    draw_content_column(frame, columns[1], app);
}

/// Title, tags and replacement tags
fn draw_metadata_column(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.compose;
    let draft = &form.draft;

    let suggestion_height = if form.suggestions.is_empty() {
        0
    } else {
        (form.suggestions.len() as u16).min(MAX_SUGGESTION_ROWS) + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                 // Title
            Constraint::Length(3),                 // Tag input
            Constraint::Length(suggestion_height), // Suggestions
            Constraint::Length(4),                 // Tag chips
            Constraint::Length(3),                 // Placeholder input
            Constraint::Length(4),                 // Placeholder chips
            Constraint::Min(0),
        ])
        .split(area);

    draw_input(
        frame,
        chunks[0],
        ComposeField::Title.label(),
        &draft.title,
        form.is_active(ComposeField::Title),
        "Enter a title for the form",
    );

    draw_input(
        frame,
        chunks[1],
        ComposeField::TagInput.label(),
        &draft.tag_input,
        form.is_active(ComposeField::TagInput),
        "Type a tag to add",
    );

    if suggestion_height > 0 {
        draw_suggestions(
            frame,
            chunks[2],
            &form.suggestions,
            form.highlighted_suggestion,
        );
    }

    draw_chips(
        frame,
        chunks[3],
        ComposeField::TagList.label(),
        &draft.tags,
        form.selected_tag,
        form.is_active(ComposeField::TagList),
    );

    draw_input(
        frame,
        chunks[4],
        ComposeField::PlaceholderInput.label(),
        &draft.placeholder_input,
        form.is_active(ComposeField::PlaceholderInput),
        "Name a replacement tag, then insert it into the form",
    );

    // Show how often each placeholder currently appears in the body
    let placeholder_chips: Vec<String> = draft
        .placeholders
        .iter()
        .map(|name| match marker_count(draft.body.text(), name) {
            0 => name.clone(),
            n => format!("{name} ({n})"),
        })
        .collect();
    draw_chips(
        frame,
        chunks[5],
        ComposeField::PlaceholderList.label(),
        &placeholder_chips,
        form.selected_placeholder,
        form.is_active(ComposeField::PlaceholderList),
    );
}

/// Body, author fields, visibility and submit
fn draw_content_column(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.compose;
    let draft = &form.draft;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),                // Body
            Constraint::Length(3),             // Author
            Constraint::Length(3),             // Email
            Constraint::Length(3),             // Email visible
            Constraint::Length(BUTTON_HEIGHT), // Submit
        ])
        .split(area);

    draw_input(
        frame,
        chunks[0],
        ComposeField::Body.label(),
        &draft.body,
        form.is_active(ComposeField::Body),
        "Write the form",
    );

    draw_input(
        frame,
        chunks[1],
        ComposeField::AuthorName.label(),
        &draft.author_name,
        form.is_active(ComposeField::AuthorName),
        "Nickname shown to readers; please avoid your real name",
    );

    draw_input(
        frame,
        chunks[2],
        ComposeField::AuthorEmail.label(),
        &draft.author_email,
        form.is_active(ComposeField::AuthorEmail),
        "Enter your email",
    );

    draw_checkbox(
        frame,
        chunks[3],
        ComposeField::EmailVisible.label(),
        draft.email_visible,
        form.is_active(ComposeField::EmailVisible),
    );

    render_button(
        frame,
        chunks[4],
        ComposeField::Submit.label(),
        form.is_active(ComposeField::Submit),
        true,
    );
}

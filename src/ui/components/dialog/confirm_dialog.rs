//! Confirmation dialog shown before a form is submitted

use crate::state::PendingSubmit;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the submit confirmation dialog
pub fn render_confirm_dialog(frame: &mut Frame, pending: &PendingSubmit, title: &str) {
    let area = frame.area();

    // Dialog dimensions
    let dialog_width = 50u16.min(area.width);
    let dialog_height = 10u16.min(area.height);

    // Center the dialog
    let dialog_area = Rect {
        x: area.x + (area.width.saturating_sub(dialog_width)) / 2,
        y: area.y + (area.height.saturating_sub(dialog_height)) / 2,
        width: dialog_width,
        height: dialog_height,
    };

    // Clear the area behind the dialog
    frame.render_widget(Clear, dialog_area);

    let max_display_len = dialog_width.saturating_sub(6) as usize;
    let display_title = if title.trim().is_empty() {
        "(untitled)".to_string()
    } else {
        truncate_string(title, max_display_len)
    };

    let mut content = vec![
        Line::from(Span::styled(
            "Submit Form",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Do you want to submit this form?",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(display_title, Style::default().fg(Color::Cyan))),
        Line::from(""),
    ];

    // Options with selection highlighting
    let options = [(false, "Cancel", Color::White), (true, "Submit", Color::Green)];
    for (is_submit, label, base_color) in options {
        let is_selected = pending.selected_option == is_submit;
        let prefix = if is_selected { "▸ " } else { "  " };
        let style = if is_selected {
            Style::default().fg(base_color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        content.push(Line::from(Span::styled(format!("{prefix}{label}"), style)));
    }

    content.push(Line::from(vec![
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" confirm  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ]));

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::new().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, dialog_area);
}

/// Truncate a string to a maximum number of chars with ellipsis
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

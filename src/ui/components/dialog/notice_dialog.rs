//! Notice dialog for confirmations such as a finished submission

use super::base::{render_dialog, DialogConfig};
use super::error_dialog::dismiss_hint;
use ratatui::{style::Color, Frame};

pub fn render_notice_dialog(frame: &mut Frame, message: &str) {
    render_dialog(
        frame,
        DialogConfig {
            title: "Notice",
            title_color: Color::Green,
            border_color: Color::Green,
            message,
            hint: Some(dismiss_hint()),
            ..Default::default()
        },
    );
}

//! UI module for rendering the TUI

mod components;
mod forms;
mod home;
mod layout;

use crate::app::App;
use crate::state::View;
use components::{render_confirm_dialog, render_error_dialog, render_notice_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let main_area = layout::create_layout(frame.area());

    match app.state.current_view {
        View::Home => home::draw(frame, main_area, app),
        View::Compose => forms::draw_compose(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Modal overlays, most urgent last so it ends up on top
    if let Some(pending) = &app.state.pending_submit {
        render_confirm_dialog(frame, pending, app.state.compose.draft.title.text());
    }
    if let Some(notice) = app.state.current_notice() {
        render_notice_dialog(frame, notice);
    }
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    }
}

mod footer;
mod form;
mod header;
mod result;
mod toast;

use crate::ui::theme::Theme;
use crate::ui::{App, Screen};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use footer::render_footer;
use form::render_form_screen;
use header::render_header;
use result::render_result_screen;
use toast::render_toast;

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Clear with dark background
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BG)), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header (logo)
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_header(frame, layout[0], app);
    match app.screen() {
        Screen::Form => render_form_screen(frame, layout[1], app),
        Screen::Result => render_result_screen(frame, layout[1], app),
    }
    render_footer(frame, layout[2], app);

    if let Some(toast) = &app.toast {
        render_toast(frame, toast);
    }
}

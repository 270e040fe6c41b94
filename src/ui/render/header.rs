use crate::ui::theme::Theme;
use crate::ui::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub(super) fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![Span::styled(
        format!("   {}", Theme::LOGO),
        Style::default()
            .fg(Theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    )]))
    .style(Theme::bg());
    frame.render_widget(logo, rows[1]);

    let tagline = Paragraph::new(Line::from(vec![
        Span::styled(Theme::TAGLINE, Theme::text_dim()),
        Span::styled(format!(" {} ", Theme::DOT_SEPARATOR), Theme::text_dim()),
        Span::styled(app.model.as_str(), Theme::text_muted()),
        Span::raw("   "),
    ]))
    .alignment(Alignment::Right)
    .style(Theme::bg());
    frame.render_widget(tagline, rows[1]);
}

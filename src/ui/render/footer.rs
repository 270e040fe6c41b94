use crate::ui::theme::Theme;
use crate::ui::{App, Screen};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub(super) fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled("  ", Style::default())];

    let status = if app.controller.is_loading() {
        format!("{} 분석 중...", app.spinner_frame())
    } else if app.controller.error().is_some() {
        "생성 실패".to_string()
    } else if app.screen() == Screen::Result {
        format!("{} 답변 준비됨", Theme::CHECK_MARK)
    } else {
        "대기 중".to_string()
    };
    let status_color = if app.controller.error().is_some() {
        Theme::RED
    } else if app.screen() == Screen::Result {
        Theme::GREEN
    } else {
        Theme::GREY_400
    };
    spans.push(Span::styled(status, Style::default().fg(status_color)));

    let hints = key_hints(app);
    let status_width: usize = spans.iter().map(|s| s.content.width()).sum();
    let hints_width: usize = hints
        .iter()
        .map(|(key, label, _)| key.width() + label.width() + 4)
        .sum();
    let spacer_len = (area.width as usize).saturating_sub(status_width + hints_width + 2);
    if spacer_len > 0 {
        spans.push(Span::raw(" ".repeat(spacer_len)));
    }

    for (key, label, primary) in hints {
        let badge_bg = if primary { Theme::ACCENT } else { Theme::GREY_500 };
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Theme::GREY_900).bg(badge_bg),
        ));
        spans.push(Span::styled(
            format!(" {} ", label),
            Style::default().fg(if primary { Theme::GREY_300 } else { Theme::GREY_500 }),
        ));
    }

    let footer = Paragraph::new(vec![Line::from(""), Line::from(spans)]).style(Theme::bg());
    frame.render_widget(footer, area);
}

/// (key, label, primary) for the current state
fn key_hints(app: &App) -> Vec<(&'static str, &'static str, bool)> {
    match app.screen() {
        Screen::Result => vec![
            ("s", "제목 복사", false),
            ("b", "본문 복사", false),
            ("m", "메일 앱", false),
            ("↑↓", "스크롤", false),
            ("n", "새 문의", true),
            ("q", "종료", false),
        ],
        Screen::Form if app.controller.is_loading() => vec![("esc", "새 문의", false)],
        Screen::Form => {
            let mut hints = vec![
                ("↵", "생성", app.can_submit()),
                ("^J", "줄바꿈", false),
                ("F1-F3", "예시", false),
            ];
            if app.controller.error().is_some() {
                hints.push(("esc", "오류 닫기", false));
            } else {
                hints.push(("esc", "종료", false));
            }
            hints
        }
    }
}

use crate::ui::form::{InputForm, PLACEHOLDER, SAMPLE_INQUIRIES};
use crate::ui::theme::Theme;
use crate::ui::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const FEATURES: [(&str, &str); 3] = [
    ("이메일 작성", "격식있는 비즈니스 화법"),
    ("견적 제안", "문의 내용 기반 자동 산출"),
    ("자료 추천", "첨부할 파일 목록 큐레이션"),
];

pub(super) fn render_form_screen(frame: &mut Frame, area: Rect, app: &App) {
    let error_height = if app.controller.error().is_some() { 3 } else { 0 };
    let samples_height = SAMPLE_INQUIRIES.len() as u16 + 2;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),              // Intro
            Constraint::Min(5),                 // Draft
            Constraint::Length(error_height),   // Error banner
            Constraint::Length(2),              // Submit
            Constraint::Length(samples_height), // Samples
        ])
        .split(area);

    render_intro(frame, rows[0]);
    render_draft(frame, rows[1], app);
    if let Some(message) = app.controller.error() {
        render_error(frame, rows[2], message);
    }
    render_submit(frame, rows[3], app);
    render_samples(frame, rows[4], app.controller.is_loading());
}

fn render_intro(frame: &mut Frame, area: Rect) {
    let mut features = vec![Span::raw("  ")];
    for (i, (title, detail)) in FEATURES.iter().enumerate() {
        if i > 0 {
            features.push(Span::styled(
                format!("  {}  ", Theme::DOT_SEPARATOR),
                Theme::text_dim(),
            ));
        }
        features.push(Span::styled(
            format!("{} ", Theme::BULLET),
            Style::default().fg(Theme::ACCENT),
        ));
        features.push(Span::styled(*title, Theme::title()));
        features.push(Span::styled(format!(" {}", detail), Theme::text_dim()));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled("  광고주 문의, ", Theme::title()),
            Span::styled(
                "3초 만에 회신",
                Style::default()
                    .fg(Theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "  광고주의 문의 내용을 그대로 붙여넣으세요. AI가 최적의 답변을 생성합니다.",
            Theme::text_muted(),
        )),
        Line::from(""),
        Line::from(features),
    ];
    frame.render_widget(Paragraph::new(lines).style(Theme::bg()), area);
}

fn render_draft(frame: &mut Frame, area: Rect, app: &App) {
    let loading = app.controller.is_loading();
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if loading {
            Theme::border()
        } else {
            Theme::border_active()
        })
        .title(Span::styled(" 어떤 문의가 들어왔나요? ", Theme::label()))
        .padding(Padding::horizontal(1));
    if !app.form.is_empty() {
        block = block.title_bottom(
            Line::from(Span::styled(
                format!(" {}자 ", app.form.char_count()),
                Theme::text_dim(),
            ))
            .alignment(Alignment::Right),
        );
    }

    // Rows are wrapped up front so the scroll offset can keep the cursor row
    // on screen.
    let inner = block.inner(area);
    let lines = draft_lines(&app.form, loading, inner.width as usize);
    let overflow = lines.len().saturating_sub(inner.height as usize);
    let scroll = u16::try_from(overflow).unwrap_or(u16::MAX);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Theme::bg())
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn draft_lines(form: &InputForm, loading: bool, width: usize) -> Vec<Line<'static>> {
    if form.is_empty() {
        return wrap_rows(PLACEHOLDER, width)
            .into_iter()
            .map(|row| Line::from(Span::styled(row, Theme::text_dim())))
            .collect();
    }

    let text_style = if loading {
        Theme::text_muted()
    } else {
        Theme::text()
    };
    let mut rows = wrap_rows(form.draft(), width);
    if !loading {
        let cursor_width = Theme::CURSOR.width().unwrap_or(1);
        let last_width = rows.last().map_or(0, |row| row.width());
        if last_width + cursor_width > width.max(1) {
            rows.push(String::new());
        }
    }

    let mut lines: Vec<Line<'static>> = rows
        .into_iter()
        .map(|row| Line::from(Span::styled(row, text_style)))
        .collect();
    if !loading {
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled(
                Theme::CURSOR.to_string(),
                Style::default().fg(Theme::ACCENT),
            ));
        }
    }
    lines
}

/// Hard-wrap on display width. Every `\n` starts a new row.
fn wrap_rows(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;
        for c in line.chars() {
            let w = c.width().unwrap_or(0);
            if row_width + w > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push(c);
            row_width += w;
        }
        rows.push(row);
    }
    rows
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let banner = Paragraph::new(Line::from(vec![
        Span::styled(" ! ", Style::default().fg(Theme::WHITE).bg(Theme::RED)),
        Span::styled(format!(" {}", message), Style::default().fg(Theme::RED)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::RED)),
    )
    .style(Theme::bg())
    .wrap(Wrap { trim: true });
    frame.render_widget(banner, area);
}

fn render_submit(frame: &mut Frame, area: Rect, app: &App) {
    let (label, style) = if app.controller.is_loading() {
        (
            format!("  {} 분석 중...  ", app.spinner_frame()),
            Theme::button_disabled(),
        )
    } else if app.can_submit() {
        ("  ↵ AI 답변 생성하기  ".to_string(), Theme::button())
    } else {
        ("  ↵ AI 답변 생성하기  ".to_string(), Theme::button_disabled())
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![Span::raw("  "), Span::styled(label, style)]),
    ];
    frame.render_widget(Paragraph::new(lines).style(Theme::bg()), area);
}

fn render_samples(frame: &mut Frame, area: Rect, locked: bool) {
    let key_style = if locked { Theme::text_dim() } else { Theme::key() };
    let lines: Vec<Line> = (0..SAMPLE_INQUIRIES.len())
        .filter_map(|i| {
            let label = InputForm::sample_label(i)?;
            Some(Line::from(vec![
                Span::styled(format!("F{} ", i + 1), key_style),
                Span::styled(label, Theme::text_muted()),
            ]))
        })
        .collect();

    let samples = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border())
                .title(Span::styled(" 빠른 예시 입력 ", Theme::label()))
                .padding(Padding::horizontal(1)),
        )
        .style(Theme::bg());
    frame.render_widget(samples, area);
}

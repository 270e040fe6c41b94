use crate::reply::GeneratedResponse;
use crate::ui::result::{CopyTarget, ResultView};
use crate::ui::theme::Theme;
use crate::ui::App;
use crate::util::format_currency;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

const ATTACHMENT_FOOTNOTE: &str = "위 파일들을 미리 준비하여 회신에 첨부하세요.";

pub(super) fn render_result_screen(frame: &mut Frame, area: Rect, app: &App) {
    let Some(reply) = app.controller.reply() else {
        return;
    };
    let now = Instant::now();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(6)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled("  제안된 회신 내용", Theme::title()),
        Span::styled("   n 새로운 문의 작성하기", Theme::text_dim()),
    ]))
    .style(Theme::bg());
    frame.render_widget(title, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    render_email(frame, columns[0], reply, &app.result_view, now);
    render_side_panel(frame, columns[1], reply);
}

fn copy_badge(view: &ResultView, target: CopyTarget, key: char, now: Instant) -> Line<'static> {
    let line = if view.is_copied(target, now) {
        Line::from(Span::styled(
            format!(" {} 복사됨 ", Theme::CHECK_MARK),
            Style::default()
                .fg(Theme::GREEN)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled(format!(" {}", key), Theme::key()),
            Span::styled(" 복사 ", Theme::text_dim()),
        ])
    };
    line.alignment(Alignment::Right)
}

fn render_email(
    frame: &mut Frame,
    area: Rect,
    reply: &GeneratedResponse,
    view: &ResultView,
    now: Instant,
) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_active())
        .title(Span::styled(" 이메일 초안 ", Theme::label()))
        .title_bottom(
            Line::from(vec![
                Span::styled(" m", Theme::key()),
                Span::styled(" 메일 클라이언트로 열기 ", Theme::text_dim()),
            ])
            .alignment(Alignment::Right),
        );
    let inner = outer.inner(area);
    frame.render_widget(outer.style(Theme::bg()), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(inner);

    let subject = Paragraph::new(Line::from(Span::styled(
        reply.email_subject.as_str(),
        Theme::title(),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(Span::styled(" 제목 ", Theme::label()))
            .title_top(copy_badge(view, CopyTarget::Subject, 's', now))
            .padding(Padding::horizontal(1)),
    )
    .wrap(Wrap { trim: true });
    frame.render_widget(subject, rows[0]);

    let body_lines: Vec<Line> = reply
        .email_body
        .lines()
        .map(|line| Line::from(Span::styled(line, Theme::text())))
        .collect();
    let body = Paragraph::new(body_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .title(Span::styled(" 내용 ", Theme::label()))
                .title_top(copy_badge(view, CopyTarget::Body, 'b', now))
                .padding(Padding::horizontal(1)),
        )
        .wrap(Wrap { trim: false })
        .scroll((view.body_scroll, 0));
    frame.render_widget(body, rows[1]);
}

fn render_side_panel(frame: &mut Frame, area: Rect, reply: &GeneratedResponse) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_estimate(frame, rows[0], reply);
    render_attachments(frame, rows[1], reply);
}

fn render_estimate(frame: &mut Frame, area: Rect, reply: &GeneratedResponse) {
    let range = format!(
        "{} ~ {}",
        format_currency(reply.estimate_low, &reply.currency),
        format_currency(reply.estimate_high, &reply.currency)
    );

    let lines = vec![
        Line::from(Span::styled("제안 예산 범위", Theme::text_dim())),
        Line::from(Span::styled(
            range,
            Style::default()
                .fg(Theme::GREEN)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("산출 근거", Theme::text_dim())),
        Line::from(Span::styled(
            reply.pricing_rationale.as_str(),
            Theme::text_muted(),
        )),
    ];

    let estimate = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border())
                .title(Span::styled(" 예상 견적 제안 ", Theme::label()))
                .padding(Padding::horizontal(1)),
        )
        .style(Theme::bg())
        .wrap(Wrap { trim: true });
    frame.render_widget(estimate, area);
}

fn render_attachments(frame: &mut Frame, area: Rect, reply: &GeneratedResponse) {
    let mut lines = Vec::with_capacity(reply.suggested_attachments.len() * 2 + 2);
    for attachment in &reply.suggested_attachments {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", attachment.file_type),
                Style::default()
                    .fg(Theme::GREY_900)
                    .bg(Theme::INDIGO)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {}", attachment.name), Theme::title()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", attachment.reason),
            Theme::text_muted(),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(ATTACHMENT_FOOTNOTE, Theme::text_dim())));

    let attachments = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border())
                .title(Span::styled(" 추천 첨부파일 ", Theme::label()))
                .padding(Padding::horizontal(1)),
        )
        .style(Theme::bg())
        .wrap(Wrap { trim: false });
    frame.render_widget(attachments, area);
}

use crate::ui::result::{mailto_url, CopyTarget};
use crate::ui::{App, ToastKind};
use crate::util;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

const PAGE_LINES: u16 = 10;

/// Handle key events on the result screen
pub(super) fn handle_result_input(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('s') => app.copy(CopyTarget::Subject),
        KeyCode::Char('b') => app.copy(CopyTarget::Body),
        KeyCode::Char('m') => open_in_mail_client(app),
        KeyCode::Char('n') | KeyCode::Esc => app.reset(),
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.result_view.scroll_down(1),
        KeyCode::Up | KeyCode::Char('k') => app.result_view.scroll_up(1),
        KeyCode::PageDown => app.result_view.scroll_down(PAGE_LINES),
        KeyCode::PageUp => app.result_view.scroll_up(PAGE_LINES),
        _ => {}
    }
    Ok(())
}

fn open_in_mail_client(app: &mut App) {
    let Some(reply) = app.controller.reply() else {
        return;
    };
    let url = mailto_url(reply);
    match util::open_url(&url) {
        Ok(()) => app.show_toast("메일 앱을 열었습니다", ToastKind::Info),
        Err(e) => {
            tracing::warn!(error = %e, "failed to open mail client");
            app.show_toast(&format!("메일 앱을 열 수 없습니다: {}", e), ToastKind::Error);
        }
    }
}

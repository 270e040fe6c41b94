//! Input handling for the reply-pro TUI

use crate::app::RuntimeContext;
use crate::ui::{App, Screen};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

mod form;
mod result;

use form::{handle_form_input, handle_paste};
use result::handle_result_input;

/// Main key event handler - dispatches on the current screen
pub fn handle_key_event(app: &mut App, key: KeyEvent, ctx: &RuntimeContext) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(());
    }

    match app.screen() {
        Screen::Form => handle_form_input(app, key, ctx),
        Screen::Result => handle_result_input(app, key),
    }
}

/// Bracketed paste goes straight into the draft.
pub fn handle_paste_event(app: &mut App, text: &str) {
    if app.screen() == Screen::Form {
        handle_paste(app, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::messages::BackgroundMessage;
    use crate::fixtures::sample_reply;
    use crate::reply::{GeneratedResponse, GenerationError, InquiryText, ReplyGenerator};
    use crate::ui::form::SAMPLE_INQUIRIES;
    use crate::ui::result::CopyTarget;
    use crate::ui::tests::test_app;
    use async_trait::async_trait;
    use std::sync::{mpsc, Arc};
    use std::time::{Duration, Instant};

    struct FixedGenerator;

    #[async_trait]
    impl ReplyGenerator for FixedGenerator {
        async fn generate_reply(
            &self,
            _inquiry: &InquiryText,
        ) -> Result<GeneratedResponse, GenerationError> {
            Ok(sample_reply())
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, ctx: &RuntimeContext, text: &str) {
        for c in text.chars() {
            handle_key_event(app, press(KeyCode::Char(c)), ctx).unwrap();
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_enter_submits_and_settles() {
        let (mut app, _) = test_app();
        let (tx, rx) = mpsc::channel::<BackgroundMessage>();
        let ctx = RuntimeContext {
            generator: Arc::new(FixedGenerator),
            tx: &tx,
        };

        type_text(&mut app, &ctx, "견적 문의");
        handle_key_event(&mut app, press(KeyCode::Enter), &ctx).unwrap();
        assert!(app.controller.is_loading());

        // Typing is ignored while loading
        type_text(&mut app, &ctx, "x");
        assert_eq!(app.form.draft(), "견적 문의");

        let msg = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        let BackgroundMessage::ReplySettled { request_id, result } = msg;
        assert!(app.controller.settle(request_id, result));
        assert_eq!(app.screen(), Screen::Result);
    }

    #[test]
    fn test_enter_on_blank_draft_does_nothing() {
        let (mut app, _) = test_app();
        let (tx, rx) = mpsc::channel::<BackgroundMessage>();
        let ctx = RuntimeContext {
            generator: Arc::new(FixedGenerator),
            tx: &tx,
        };
        type_text(&mut app, &ctx, "   ");
        handle_key_event(&mut app, press(KeyCode::Enter), &ctx).unwrap();
        assert!(!app.controller.is_loading());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let (mut app, _) = test_app();
        let (tx, _rx) = mpsc::channel::<BackgroundMessage>();
        let ctx = RuntimeContext {
            generator: Arc::new(FixedGenerator),
            tx: &tx,
        };
        type_text(&mut app, &ctx, "a");
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT),
            &ctx,
        )
        .unwrap();
        type_text(&mut app, &ctx, "b");
        assert_eq!(app.form.draft(), "a\nb");
        assert!(!app.controller.is_loading());
    }

    /// Terminals without keyboard enhancement never report Shift+Enter, so
    /// Ctrl+J and Alt+Enter must insert a newline instead of submitting.
    #[test]
    fn test_ctrl_j_and_alt_enter_insert_newline() {
        let (mut app, _) = test_app();
        let (tx, rx) = mpsc::channel::<BackgroundMessage>();
        let ctx = RuntimeContext {
            generator: Arc::new(FixedGenerator),
            tx: &tx,
        };
        type_text(&mut app, &ctx, "a");
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL),
            &ctx,
        )
        .unwrap();
        type_text(&mut app, &ctx, "b");
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT),
            &ctx,
        )
        .unwrap();
        type_text(&mut app, &ctx, "c");

        assert_eq!(app.form.draft(), "a\nb\nc");
        assert!(!app.controller.is_loading());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_function_keys_pick_samples() {
        let (mut app, _) = test_app();
        let (tx, _rx) = mpsc::channel::<BackgroundMessage>();
        let ctx = RuntimeContext {
            generator: Arc::new(FixedGenerator),
            tx: &tx,
        };
        handle_key_event(&mut app, press(KeyCode::F(2)), &ctx).unwrap();
        assert_eq!(app.form.draft(), SAMPLE_INQUIRIES[1]);
        handle_key_event(&mut app, press(KeyCode::F(9)), &ctx).unwrap();
        assert_eq!(app.form.draft(), SAMPLE_INQUIRIES[1]);
    }

    #[test]
    fn test_esc_clears_error_then_quits() {
        let (mut app, _) = test_app();
        let (tx, _rx) = mpsc::channel::<BackgroundMessage>();
        let ctx = RuntimeContext {
            generator: Arc::new(FixedGenerator),
            tx: &tx,
        };
        app.form.push_str("문의");
        let pending = app.submit().unwrap();
        app.controller
            .settle(pending.id, Err(GenerationError::EmptyPayload));

        handle_key_event(&mut app, press(KeyCode::Esc), &ctx).unwrap();
        assert!(app.controller.error().is_none());
        assert!(!app.should_quit);

        handle_key_event(&mut app, press(KeyCode::Esc), &ctx).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_result_keys_copy_and_reset() {
        let (mut app, clipboard) = test_app();
        let (tx, _rx) = mpsc::channel::<BackgroundMessage>();
        let ctx = RuntimeContext {
            generator: Arc::new(FixedGenerator),
            tx: &tx,
        };
        app.form.push_str("문의");
        let pending = app.submit().unwrap();
        app.controller.settle(pending.id, Ok(sample_reply()));

        handle_key_event(&mut app, press(KeyCode::Char('b')), &ctx).unwrap();
        assert_eq!(*clipboard.0.borrow(), vec![sample_reply().email_body]);
        assert!(app.result_view.is_copied(CopyTarget::Body, Instant::now()));

        handle_key_event(&mut app, press(KeyCode::Char('j')), &ctx).unwrap();
        assert_eq!(app.result_view.body_scroll, 1);

        handle_key_event(&mut app, press(KeyCode::Char('n')), &ctx).unwrap();
        assert_eq!(app.screen(), Screen::Form);
        assert_eq!(app.form.draft(), "문의");
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let (mut app, _) = test_app();
        let (tx, _rx) = mpsc::channel::<BackgroundMessage>();
        let ctx = RuntimeContext {
            generator: Arc::new(FixedGenerator),
            tx: &tx,
        };
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &ctx,
        )
        .unwrap();
        assert!(app.should_quit);
        assert!(app.form.is_empty());
    }

    #[test]
    fn test_paste_appends_to_draft() {
        let (mut app, _) = test_app();
        handle_paste_event(&mut app, "첫 줄\r\n둘째 줄");
        assert_eq!(app.form.draft(), "첫 줄\n둘째 줄");
    }
}

//! Reply Pro UI - a single-screen inquiry desk
//!
//! Layout (form screen):
//! ╔══════════════════════════════════════════════════════════════╗
//! ║  Ki's Smart AI Reply Pro          AI Powered Agency Assistant║
//! ╠══════════════════════════════════════════════════════════════╣
//! ║  광고주 문의, 3초 만에 회신하세요                            ║
//! ║  ┌ 어떤 문의가 들어왔나요? ─────────────────────────────────┐ ║
//! ║  │ 유튜브 브랜디드 콘텐츠 영상 제작 단가가 궁금합니다.▏    │ ║
//! ║  └──────────────────────────────────────────────── 31자 ──┘ ║
//! ║   ↵ AI 답변 생성하기                                         ║
//! ║  ┌ 빠른 예시 입력 ──────────────────────────────────────────┐ ║
//! ║  │ F1 새로 출시하는 화장품 브랜드의...                       │ ║
//! ╠══════════════════════════════════════════════════════════════╣
//! ║  ↵ generate  F1-F3 sample  esc quit                          ║
//! ╚══════════════════════════════════════════════════════════════╝
//!
//! Once a reply arrives the form is replaced by the result screen (email
//! draft on the left, estimate and attachments on the right).

pub mod form;
pub mod render;
pub mod result;
pub mod theme;

pub use render::render;

use crate::app::controller::{AnalysisController, PendingRequest};
use form::InputForm;
use result::{ClipboardSink, CopyTarget, ResultView};
use std::time::Instant;

/// Which screen the state maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Idle, loading, or settled with an error
    Form,
    /// Settled with a reply
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    /// Duration in seconds before toast expires
    pub fn duration_secs(&self) -> u64 {
        match self {
            ToastKind::Info => 3,
            ToastKind::Success => 3,
            ToastKind::Error => 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub created_at: Instant,
    pub kind: ToastKind,
}

impl Toast {
    pub fn new(message: &str, kind: ToastKind) -> Self {
        Self {
            message: message.to_string(),
            created_at: Instant::now(),
            kind,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= self.kind.duration_secs()
    }
}

/// Everything the screen shows, owned by the UI thread.
pub struct App {
    pub controller: AnalysisController,
    pub form: InputForm,
    pub result_view: ResultView,
    pub toast: Option<Toast>,
    pub loading_frame: usize,
    pub should_quit: bool,
    /// Model id shown in the header
    pub model: String,
    clipboard: Box<dyn ClipboardSink>,
}

impl App {
    pub fn new(model: impl Into<String>, clipboard: Box<dyn ClipboardSink>) -> Self {
        Self {
            controller: AnalysisController::new(),
            form: InputForm::new(),
            result_view: ResultView::default(),
            toast: None,
            loading_frame: 0,
            should_quit: false,
            model: model.into(),
            clipboard,
        }
    }

    pub fn screen(&self) -> Screen {
        if self.controller.reply().is_some() {
            Screen::Result
        } else {
            Screen::Form
        }
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit(self.controller.is_loading())
    }

    /// Submit the current draft. The draft is kept so the user can come
    /// back to it after a reset.
    pub fn submit(&mut self) -> Option<PendingRequest> {
        if !self.can_submit() {
            return None;
        }
        let pending = self.controller.submit(self.form.draft())?;
        self.result_view = ResultView::default();
        self.loading_frame = 0;
        Some(pending)
    }

    /// Start a new inquiry from whatever state we are in.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.result_view = ResultView::default();
    }

    /// Replace the draft with a sample, unless a request is in flight.
    pub fn select_sample(&mut self, index: usize) {
        if self.controller.is_loading() {
            return;
        }
        self.form.select_sample(index);
    }

    pub fn copy(&mut self, target: CopyTarget) {
        let Some(reply) = self.controller.reply() else {
            return;
        };
        if let Err(e) = self.result_view.copy(
            target,
            reply,
            self.clipboard.as_mut(),
            Instant::now(),
        ) {
            tracing::warn!(error = %e, "clipboard copy failed");
            self.show_toast(&e, ToastKind::Error);
        }
    }

    /// Advance animations and drop expired transient state.
    pub fn tick(&mut self) {
        if self.controller.is_loading() {
            self.loading_frame = self.loading_frame.wrapping_add(1);
        }
        self.result_view.expire(Instant::now());
        self.clear_expired_toast();
    }

    pub fn clear_expired_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    pub fn show_toast(&mut self, message: &str, kind: ToastKind) {
        self.toast = Some(Toast::new(message, kind));
    }

    pub fn spinner_frame(&self) -> char {
        theme::Theme::SPINNER_BRAILLE[self.loading_frame % theme::Theme::SPINNER_BRAILLE.len()]
    }
}

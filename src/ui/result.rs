//! Result view state: copy confirmations, body scroll, clipboard and mail
//! hand-off.
//!
//! Nothing here validates the reply; it is rendered as received.

use crate::reply::GeneratedResponse;
use arboard::Clipboard;
use std::time::{Duration, Instant};
use url::form_urlencoded;

/// How long the "copied" confirmation stays up.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Subject,
    Body,
}

impl CopyTarget {
    pub fn text(self, reply: &GeneratedResponse) -> &str {
        match self {
            CopyTarget::Subject => &reply.email_subject,
            CopyTarget::Body => &reply.email_body,
        }
    }
}

/// Where copied text goes.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

/// The OS clipboard, if one could be opened.
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self {
            inner: Clipboard::new().ok(),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        match &mut self.inner {
            Some(cb) => cb
                .set_text(text.to_string())
                .map_err(|e| format!("Failed to copy to clipboard: {}", e)),
            None => Err("Clipboard not available".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResultView {
    subject_copied_at: Option<Instant>,
    body_copied_at: Option<Instant>,
    /// Vertical scroll of the email body, in lines
    pub body_scroll: u16,
}

impl ResultView {
    fn slot(&mut self, target: CopyTarget) -> &mut Option<Instant> {
        match target {
            CopyTarget::Subject => &mut self.subject_copied_at,
            CopyTarget::Body => &mut self.body_copied_at,
        }
    }

    /// Copy one field and start its confirmation timer. Copying the same
    /// field again just restarts the timer.
    pub fn copy(
        &mut self,
        target: CopyTarget,
        reply: &GeneratedResponse,
        clipboard: &mut dyn ClipboardSink,
        now: Instant,
    ) -> Result<(), String> {
        clipboard.set_text(target.text(reply))?;
        *self.slot(target) = Some(now);
        Ok(())
    }

    pub fn is_copied(&self, target: CopyTarget, now: Instant) -> bool {
        let copied_at = match target {
            CopyTarget::Subject => self.subject_copied_at,
            CopyTarget::Body => self.body_copied_at,
        };
        copied_at.is_some_and(|t| now.saturating_duration_since(t) < COPY_FEEDBACK)
    }

    /// Drop confirmations older than [`COPY_FEEDBACK`].
    pub fn expire(&mut self, now: Instant) {
        for target in [CopyTarget::Subject, CopyTarget::Body] {
            if !self.is_copied(target, now) {
                *self.slot(target) = None;
            }
        }
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.body_scroll = self.body_scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.body_scroll = self.body_scroll.saturating_sub(lines);
    }
}

/// `mailto:` link that opens a new message with subject and body filled in.
pub fn mailto_url(reply: &GeneratedResponse) -> String {
    format!(
        "mailto:?subject={}&body={}",
        mail_encode(&reply.email_subject),
        mail_encode(&reply.email_body)
    )
}

/// Percent-encode for a mailto query. Spaces become `%20`, not `+`, since
/// mail clients take `+` literally.
fn mail_encode(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

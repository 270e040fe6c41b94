//! Background task handling for reply-pro
//!
//! Channel sends use `let _ =`: if the receiver is gone the app is shutting
//! down and nobody is waiting for the result.

use crate::app::messages::BackgroundMessage;
use crate::app::PendingRequest;
use crate::reply::{GenerationError, ReplyGenerator};
use crate::ui::result::ResultView;
use crate::ui::App;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::mpsc;
use std::sync::Arc;
use uuid::Uuid;

pub fn drain_messages(app: &mut App, rx: &mpsc::Receiver<BackgroundMessage>) {
    while let Ok(msg) = rx.try_recv() {
        match msg {
            BackgroundMessage::ReplySettled { request_id, result } => {
                let succeeded = result.is_ok();
                if app.controller.settle(request_id, result) && succeeded {
                    app.result_view = ResultView::default();
                }
            }
        }
    }
}

/// Run one generation request off the UI thread.
pub fn spawn_generation(
    generator: Arc<dyn ReplyGenerator>,
    pending: PendingRequest,
    tx: mpsc::Sender<BackgroundMessage>,
) {
    let request_id = pending.id;
    let tx_reply = tx.clone();
    spawn_background(tx, "reply_generation", request_id, async move {
        let result = generator.generate_reply(&pending.inquiry).await;
        let _ = tx_reply.send(BackgroundMessage::ReplySettled { request_id, result });
    });
}

/// Spawn a task tied to `request_id`. A panic inside the task still settles
/// the request, so the UI never stays stuck in loading.
pub fn spawn_background<F>(
    tx: mpsc::Sender<BackgroundMessage>,
    task_name: &'static str,
    request_id: Uuid,
    fut: F,
) where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(panic) = AssertUnwindSafe(fut).catch_unwind().await {
            let detail = if let Some(s) = panic.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic payload".to_string()
            };
            tracing::error!(task = task_name, request_id = %request_id, %detail, "background task panicked");
            let _ = tx.send(BackgroundMessage::ReplySettled {
                request_id,
                result: Err(GenerationError::Interrupted(format!(
                    "Background task '{}' crashed unexpectedly: {}",
                    task_name, detail
                ))),
            });
        }
    });
}

use crate::reply::{GeneratedResponse, GenerationError};
use uuid::Uuid;

/// Messages from background tasks to the main UI thread
pub enum BackgroundMessage {
    /// A generation request finished, successfully or not
    ReplySettled {
        request_id: Uuid,
        result: Result<GeneratedResponse, GenerationError>,
    },
}

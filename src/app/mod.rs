pub mod background;
pub mod controller;
pub mod input;
pub mod messages;
pub mod runtime;

pub use controller::{AnalysisController, AnalysisState, PendingRequest};
pub use messages::BackgroundMessage;
pub use runtime::run_tui;

use crate::reply::ReplyGenerator;
use std::sync::mpsc;
use std::sync::Arc;

pub struct RuntimeContext<'a> {
    pub generator: Arc<dyn ReplyGenerator>,
    pub tx: &'a mpsc::Sender<messages::BackgroundMessage>,
}

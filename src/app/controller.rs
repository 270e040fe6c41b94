//! Analysis lifecycle: idle → loading → settled (reply or error) → idle
//!
//! The controller is the only owner of the analysis state. Presentation code
//! reads it through [`AnalysisController::state`] and changes it only through
//! the `submit` / `settle` / `reset` intents.
//!
//! Every submit is tagged with a fresh request id. A settlement whose id is
//! not the one currently in flight (the user reset, or a second settlement
//! for the same request arrived) is dropped, so a late response can never
//! overwrite a newer state.

use crate::reply::{GeneratedResponse, GenerationError, InquiryText};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Shown for every failed attempt; the cause goes to the log only.
pub const GENERATION_FAILED_MESSAGE: &str =
    "답변을 생성하는 도중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading {
        request_id: Uuid,
    },
    Settled(Settlement),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    Reply(GeneratedResponse),
    Failed(String),
}

/// Read-only view in the `{ isLoading, data, error }` shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisState<'a> {
    pub is_loading: bool,
    pub data: Option<&'a GeneratedResponse>,
    pub error: Option<&'a str>,
}

impl AnalysisState<'_> {
    /// Number of active members; the lifecycle keeps this at most one.
    pub fn active_count(&self) -> usize {
        usize::from(self.is_loading)
            + usize::from(self.data.is_some())
            + usize::from(self.error.is_some())
    }
}

/// A request the caller must now run and report back with `settle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: Uuid,
    pub inquiry: InquiryText,
}

#[derive(Debug, Default)]
pub struct AnalysisController {
    phase: Phase,
}

impl AnalysisController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn state(&self) -> AnalysisState<'_> {
        match &self.phase {
            Phase::Idle => AnalysisState {
                is_loading: false,
                data: None,
                error: None,
            },
            Phase::Loading { .. } => AnalysisState {
                is_loading: true,
                data: None,
                error: None,
            },
            Phase::Settled(Settlement::Reply(data)) => AnalysisState {
                is_loading: false,
                data: Some(data),
                error: None,
            },
            Phase::Settled(Settlement::Failed(message)) => AnalysisState {
                is_loading: false,
                data: None,
                error: Some(message.as_str()),
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    pub fn reply(&self) -> Option<&GeneratedResponse> {
        self.state().data
    }

    pub fn error(&self) -> Option<&str> {
        self.state().error
    }

    /// Start a new analysis.
    ///
    /// Returns `None` (and leaves the state untouched) for blank text or
    /// while another request is in flight. Otherwise any previous reply or
    /// error is dropped immediately and the state becomes loading.
    pub fn submit(&mut self, text: &str) -> Option<PendingRequest> {
        if self.is_loading() {
            debug!("submit ignored: a request is already in flight");
            return None;
        }
        let inquiry = InquiryText::new(text)?;
        let id = Uuid::new_v4();
        self.phase = Phase::Loading { request_id: id };
        info!(request_id = %id, inquiry_chars = inquiry.char_count(), "analysis started");
        Some(PendingRequest { id, inquiry })
    }

    /// Apply the outcome of request `id`.
    ///
    /// Returns `false` when the outcome is stale and was discarded.
    pub fn settle(
        &mut self,
        id: Uuid,
        result: Result<GeneratedResponse, GenerationError>,
    ) -> bool {
        match self.phase {
            Phase::Loading { request_id } if request_id == id => {}
            _ => {
                debug!(request_id = %id, "discarding stale generation result");
                return false;
            }
        }

        self.phase = Phase::Settled(match result {
            Ok(reply) => {
                info!(
                    request_id = %id,
                    attachments = reply.suggested_attachments.len(),
                    "analysis finished"
                );
                Settlement::Reply(reply)
            }
            Err(err) => {
                warn!(request_id = %id, kind = err.kind(), error = %err, "analysis failed");
                Settlement::Failed(GENERATION_FAILED_MESSAGE.to_string())
            }
        });
        true
    }

    /// Back to idle from any state.
    pub fn reset(&mut self) {
        if let Phase::Loading { request_id } = self.phase {
            debug!(request_id = %request_id, "reset while loading; result will be ignored");
        }
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_reply;
    use crate::reply::ReplyGenerator;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Generator that replays a fixed payload through the real parser.
    struct ScriptedGenerator {
        payload: String,
        calls: AtomicUsize,
    }

    impl ScriptedGenerator {
        fn new(payload: &str) -> Self {
            Self {
                payload: payload.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ReplyGenerator for ScriptedGenerator {
        async fn generate_reply(
            &self,
            _inquiry: &InquiryText,
        ) -> Result<GeneratedResponse, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            crate::reply::parse::parse_generated_response(&self.payload)
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl ReplyGenerator for FailingGenerator {
        async fn generate_reply(
            &self,
            _inquiry: &InquiryText,
        ) -> Result<GeneratedResponse, GenerationError> {
            Err(GenerationError::Status {
                status: 503,
                body: "overloaded".into(),
            })
        }
    }

    const VALID_PAYLOAD: &str = r#"{
        "emailSubject": "유튜브 영상 제작 견적 안내",
        "emailBody": "안녕하세요.",
        "estimateLow": 3000000,
        "estimateHigh": 8000000,
        "currency": "KRW",
        "pricingRationale": "편당 단가 기준",
        "suggestedAttachments": [
            {"name": "회사소개서", "reason": "역량", "fileType": "PDF"},
            {"name": "포트폴리오", "reason": "사례", "fileType": "PPTX"},
            {"name": "단가표", "reason": "근거", "fileType": "XLSX"}
        ]
    }"#;

    async fn run_once(
        controller: &mut AnalysisController,
        generator: &dyn ReplyGenerator,
        text: &str,
    ) {
        let pending = controller.submit(text).expect("submit accepted");
        assert!(controller.is_loading());
        let result = generator.generate_reply(&pending.inquiry).await;
        assert!(controller.settle(pending.id, result));
    }

    #[test]
    fn test_initial_state_is_idle() {
        let controller = AnalysisController::new();
        assert_eq!(controller.phase(), &Phase::Idle);
        assert_eq!(controller.state().active_count(), 0);
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut controller = AnalysisController::new();
        for text in ["", "   ", "\n\t"] {
            assert!(controller.submit(text).is_none());
            assert_eq!(controller.phase(), &Phase::Idle);
        }

        let pending = controller.submit("문의").unwrap();
        controller.settle(pending.id, Ok(sample_reply()));
        let before = controller.phase().clone();
        assert!(controller.submit("  ").is_none());
        assert_eq!(controller.phase(), &before);
    }

    #[test]
    fn test_submit_trims_inquiry() {
        let mut controller = AnalysisController::new();
        let pending = controller.submit("  유튜브 영상 제작 단가 문의  ").unwrap();
        assert_eq!(pending.inquiry.as_str(), "유튜브 영상 제작 단가 문의");
    }

    #[test]
    fn test_submit_clears_previous_result_immediately() {
        let mut controller = AnalysisController::new();
        let first = controller.submit("첫 문의").unwrap();
        controller.settle(first.id, Ok(sample_reply()));
        assert!(controller.reply().is_some());

        // Resubmitting from a settled state is allowed and drops stale data.
        let second = controller.submit("두번째 문의").unwrap();
        let state = controller.state();
        assert!(state.is_loading);
        assert!(state.data.is_none());
        assert!(state.error.is_none());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        let mut controller = AnalysisController::new();
        let pending = controller.submit("문의").unwrap();
        assert!(controller.submit("또 다른 문의").is_none());
        assert_eq!(
            controller.phase(),
            &Phase::Loading {
                request_id: pending.id
            }
        );
    }

    #[test]
    fn test_failure_uses_fixed_message() {
        let mut controller = AnalysisController::new();
        let pending = controller.submit("문의").unwrap();
        controller.settle(
            pending.id,
            Err(GenerationError::MalformedPayload("raw cause".into())),
        );
        let state = controller.state();
        assert_eq!(state.error, Some(GENERATION_FAILED_MESSAGE));
        assert!(state.data.is_none());
        assert!(!state.is_loading);
    }

    #[test]
    fn test_reset_is_idempotent_from_every_state() {
        let mut controller = AnalysisController::new();
        controller.reset();
        controller.reset();
        assert_eq!(controller.phase(), &Phase::Idle);

        controller.submit("문의").unwrap();
        controller.reset();
        assert_eq!(controller.phase(), &Phase::Idle);

        let pending = controller.submit("문의").unwrap();
        controller.settle(pending.id, Ok(sample_reply()));
        controller.reset();
        controller.reset();
        assert_eq!(controller.phase(), &Phase::Idle);

        let pending = controller.submit("문의").unwrap();
        controller.settle(pending.id, Err(GenerationError::EmptyPayload));
        controller.reset();
        assert_eq!(controller.phase(), &Phase::Idle);
    }

    #[test]
    fn test_late_result_after_reset_is_discarded() {
        let mut controller = AnalysisController::new();
        let pending = controller.submit("문의").unwrap();
        controller.reset();

        assert!(!controller.settle(pending.id, Ok(sample_reply())));
        assert_eq!(controller.phase(), &Phase::Idle);
    }

    #[test]
    fn test_late_result_from_older_request_is_discarded() {
        let mut controller = AnalysisController::new();
        let old = controller.submit("오래된 문의").unwrap();
        controller.reset();
        let current = controller.submit("새 문의").unwrap();

        assert!(!controller.settle(old.id, Err(GenerationError::EmptyPayload)));
        assert!(controller.is_loading());

        assert!(controller.settle(current.id, Ok(sample_reply())));
        assert!(controller.reply().is_some());
    }

    #[test]
    fn test_second_settlement_is_discarded() {
        let mut controller = AnalysisController::new();
        let pending = controller.submit("문의").unwrap();
        assert!(controller.settle(pending.id, Ok(sample_reply())));
        assert!(!controller.settle(pending.id, Err(GenerationError::EmptyPayload)));
        assert!(controller.reply().is_some());
    }

    #[tokio::test]
    async fn test_scenario_youtube_inquiry_preserves_bounds() {
        let mut controller = AnalysisController::new();
        let generator = ScriptedGenerator::new(VALID_PAYLOAD);
        run_once(&mut controller, &generator, "유튜브 영상 제작 단가 문의").await;

        let data = controller.reply().expect("settled with data");
        assert_eq!(data.estimate_low, 3_000_000.0);
        assert_eq!(data.estimate_high, 8_000_000.0);
        assert_eq!(data.currency, "KRW");
        assert_eq!(data.suggested_attachments.len(), 3);
        assert!(data.estimate_high >= data.estimate_low && data.estimate_low >= 0.0);
        assert!(controller.error().is_none());
    }

    #[tokio::test]
    async fn test_capability_failure_settles_with_error() {
        let mut controller = AnalysisController::new();
        run_once(&mut controller, &FailingGenerator, "문의").await;
        assert_eq!(controller.error(), Some(GENERATION_FAILED_MESSAGE));
        assert!(controller.reply().is_none());
    }

    #[tokio::test]
    async fn test_bad_payloads_never_settle_with_data() {
        let payloads = [
            "",
            "not json at all",
            r#"{"emailSubject": "제목"}"#,
            r#"{"emailSubject":"a","emailBody":"b","estimateLow":5,"estimateHigh":1,"currency":"KRW","pricingRationale":"c","suggestedAttachments":[]}"#,
            r#"{"emailSubject":"a","emailBody":"b","estimateLow":1,"estimateHigh":5,"currency":"KRW","pricingRationale":"c","suggestedAttachments":[{"name":"x"}]}"#,
        ];
        for payload in payloads {
            let mut controller = AnalysisController::new();
            let generator = ScriptedGenerator::new(payload);
            run_once(&mut controller, &generator, "문의").await;
            assert!(controller.reply().is_none(), "payload {payload:?}");
            assert_eq!(controller.error(), Some(GENERATION_FAILED_MESSAGE));
        }
    }

    #[tokio::test]
    async fn test_identical_inquiries_call_twice() {
        let mut controller = AnalysisController::new();
        let generator = ScriptedGenerator::new(VALID_PAYLOAD);
        run_once(&mut controller, &generator, "같은 문의").await;
        controller.reset();
        run_once(&mut controller, &generator, "같은 문의").await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_at_most_one_member_active_across_cycle() {
        let mut controller = AnalysisController::new();
        let generator = ScriptedGenerator::new(VALID_PAYLOAD);
        let mut observed = vec![controller.state().active_count()];

        let pending = controller.submit("문의").unwrap();
        observed.push(controller.state().active_count());
        let result = generator.generate_reply(&pending.inquiry).await;
        controller.settle(pending.id, result);
        observed.push(controller.state().active_count());
        controller.reset();
        observed.push(controller.state().active_count());

        let pending = controller.submit("문의").unwrap();
        controller.settle(pending.id, Err(GenerationError::EmptyPayload));
        observed.push(controller.state().active_count());

        assert!(observed.iter().all(|&n| n <= 1), "{observed:?}");
        assert_eq!(observed, vec![0, 1, 1, 0, 1]);
    }
}

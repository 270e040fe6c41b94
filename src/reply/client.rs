use super::error::GenerationError;
use super::models::{GeneratedResponse, InquiryText, Usage};
use super::parse::parse_generated_response;
use super::prompts::{reply_plan_schema, REPLY_PLAN_SYSTEM};
use crate::config::Config;
use crate::util::truncate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Gemini REST API root (v1beta carries `responseSchema` support)
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Balance between creativity and professional structure
pub const TEMPERATURE: f32 = 0.7;

const RESPONSE_MIME_TYPE: &str = "application/json";

/// Error bodies are clipped to this many characters before logging.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// The "generate structured reply" capability.
///
/// One call is one attempt: implementations must not retry or cache.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate_reply(
        &self,
        inquiry: &InquiryText,
    ) -> Result<GeneratedResponse, GenerationError>;
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
    temperature: f32,
}

impl GenerationRequest {
    /// Build a fresh request: fixed persona, fixed schema, fixed temperature.
    pub fn for_inquiry(inquiry: &InquiryText) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: REPLY_PLAN_SYSTEM.to_string(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: inquiry.as_str().to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: RESPONSE_MIME_TYPE.to_string(),
                response_schema: reply_plan_schema(),
                temperature: TEMPERATURE,
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<Usage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Pull the generated text out of a `generateContent` response body.
///
/// Text parts of the first candidate are concatenated; a response with no
/// candidate, no parts, or only blank text is an empty payload.
pub(crate) fn extract_payload_text(body: &str) -> Result<(String, Option<Usage>), GenerationError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        GenerationError::MalformedPayload(format!("unexpected response envelope: {}", e))
    })?;

    let Some(candidate) = parsed.candidates.first() else {
        return Err(GenerationError::EmptyPayload);
    };

    let text: String = candidate
        .content
        .as_ref()
        .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        if let Some(reason) = &candidate.finish_reason {
            debug!(finish_reason = %reason, "candidate carried no text");
        }
        return Err(GenerationError::EmptyPayload);
    }

    Ok((text, parsed.usage_metadata))
}

/// HTTP client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        if api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key,
            model: model.into(),
            base_url: base_url.into(),
        })
    }

    /// Build a client from the user's config; fails if no key can be found.
    pub fn from_config(config: &Config) -> Result<Self, GenerationError> {
        let api_key = config.get_api_key().ok_or(GenerationError::MissingApiKey)?;
        Self::new(
            api_key,
            config.model.clone(),
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ReplyGenerator for GeminiClient {
    async fn generate_reply(
        &self,
        inquiry: &InquiryText,
    ) -> Result<GeneratedResponse, GenerationError> {
        let request = GenerationRequest::for_inquiry(inquiry);
        debug!(
            model = %self.model,
            inquiry_chars = inquiry.char_count(),
            "sending generateContent request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "generateContent returned an error status");
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let (text, usage) = extract_payload_text(&body)?;
        if let Some(usage) = usage {
            info!(
                prompt_tokens = usage.prompt_token_count,
                response_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "generateContent usage"
            );
        }

        parse_generated_response(&text)
    }
}

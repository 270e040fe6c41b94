use serde::{Deserialize, Serialize};
use std::fmt;

/// A client inquiry that is guaranteed to be non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryText(String);

impl InquiryText {
    /// Trim `raw` and wrap it. Returns `None` for empty or whitespace-only text.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (not bytes), used for logging.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for InquiryText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated reply plan.
///
/// Values only come out of [`crate::reply::parse::parse_generated_response`],
/// which enforces the field constraints, so presentation code can render
/// them without re-checking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResponse {
    pub email_subject: String,
    pub email_body: String,
    pub estimate_low: f64,
    pub estimate_high: f64,
    /// Upper-case three letter code, e.g. `KRW`
    pub currency: String,
    pub pricing_rationale: String,
    pub suggested_attachments: Vec<AttachmentSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentSuggestion {
    pub name: String,
    pub reason: String,
    pub file_type: String,
}

/// Token accounting reported by the Gemini API (`usageMetadata`).
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

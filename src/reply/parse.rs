use super::error::GenerationError;
use super::models::{AttachmentSuggestion, GeneratedResponse};
use serde_json::{Map, Value};

/// Strip markdown code fences from a response
fn strip_markdown_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let clean = if trimmed.starts_with("```json") {
        trimmed.strip_prefix("```json").unwrap_or(trimmed)
    } else if trimmed.starts_with("```") {
        trimmed.strip_prefix("```").unwrap_or(trimmed)
    } else {
        trimmed
    };
    let clean = if clean.ends_with("```") {
        clean.strip_suffix("```").unwrap_or(clean)
    } else {
        clean
    };
    clean.trim()
}

/// Parse and validate the model's JSON payload.
///
/// The payload must be a single JSON object with every field of the reply
/// plan present and well-typed. Nothing is defaulted: a reply that is only
/// partly usable is rejected as a whole.
pub(crate) fn parse_generated_response(text: &str) -> Result<GeneratedResponse, GenerationError> {
    let clean = strip_markdown_fences(text);
    if clean.is_empty() {
        return Err(GenerationError::EmptyPayload);
    }

    let value: Value = serde_json::from_str(clean)
        .map_err(|e| GenerationError::MalformedPayload(e.to_string()))?;
    let obj = value.as_object().ok_or_else(|| {
        GenerationError::MalformedPayload(format!("expected a JSON object, got {}", type_name(&value)))
    })?;

    let email_subject = required_text(obj, "emailSubject", "emailSubject")?;
    let email_body = required_text(obj, "emailBody", "emailBody")?;
    let estimate_low = required_number(obj, "estimateLow")?;
    let estimate_high = required_number(obj, "estimateHigh")?;
    if estimate_low < 0.0 {
        return Err(GenerationError::SchemaViolation(format!(
            "estimateLow must be >= 0, got {}",
            estimate_low
        )));
    }
    if estimate_high < estimate_low {
        return Err(GenerationError::SchemaViolation(format!(
            "estimateHigh ({}) is below estimateLow ({})",
            estimate_high, estimate_low
        )));
    }
    let currency = currency_code(obj)?;
    let pricing_rationale = required_text(obj, "pricingRationale", "pricingRationale")?;
    let suggested_attachments = attachments(obj)?;

    Ok(GeneratedResponse {
        email_subject,
        email_body,
        estimate_low,
        estimate_high,
        currency,
        pricing_rationale,
        suggested_attachments,
    })
}

fn required_text(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<String, GenerationError> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(GenerationError::SchemaViolation(format!(
            "{} is missing",
            path
        ))),
        Some(Value::String(s)) if s.trim().is_empty() => Err(GenerationError::SchemaViolation(
            format!("{} is empty", path),
        )),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(GenerationError::SchemaViolation(format!(
            "{} must be a string, got {}",
            path,
            type_name(other)
        ))),
    }
}

fn required_number(obj: &Map<String, Value>, key: &str) -> Result<f64, GenerationError> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(GenerationError::SchemaViolation(format!(
            "{} is missing",
            key
        ))),
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| GenerationError::SchemaViolation(format!("{} is not finite", key))),
        Some(other) => Err(GenerationError::SchemaViolation(format!(
            "{} must be a number, got {}",
            key,
            type_name(other)
        ))),
    }
}

/// Currency must look like an ISO-4217 code: three ASCII letters.
fn currency_code(obj: &Map<String, Value>) -> Result<String, GenerationError> {
    let raw = required_text(obj, "currency", "currency")?;
    let code = raw.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(GenerationError::SchemaViolation(format!(
            "currency {:?} is not a three-letter code",
            raw
        )))
    }
}

fn attachments(obj: &Map<String, Value>) -> Result<Vec<AttachmentSuggestion>, GenerationError> {
    let items = match obj.get("suggestedAttachments") {
        None | Some(Value::Null) => {
            return Err(GenerationError::SchemaViolation(
                "suggestedAttachments is missing".to_string(),
            ))
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(GenerationError::SchemaViolation(format!(
                "suggestedAttachments must be an array, got {}",
                type_name(other)
            )))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let entry = item.as_object().ok_or_else(|| {
                GenerationError::SchemaViolation(format!(
                    "suggestedAttachments[{}] must be an object, got {}",
                    i,
                    type_name(item)
                ))
            })?;
            Ok(AttachmentSuggestion {
                name: required_text(entry, "name", &format!("suggestedAttachments[{}].name", i))?,
                reason: required_text(
                    entry,
                    "reason",
                    &format!("suggestedAttachments[{}].reason", i),
                )?,
                file_type: required_text(
                    entry,
                    "fileType",
                    &format!("suggestedAttachments[{}].fileType", i),
                )?,
            })
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

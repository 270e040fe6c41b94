use serde_json::{json, Value};

pub const REPLY_PLAN_SYSTEM: &str = r#"You are an expert Senior Account Manager at a top-tier digital advertising agency.
Your task is to analyze an incoming client inquiry and prepare a comprehensive response plan.

The user will provide a raw inquiry text. You must:
1. Draft a polite, professional, and persuasive email reply in Korean.
2. Estimate a rough budget range (in KRW) based on standard industry rates for the requested services (e.g., social media management, video production, SEO, influencers). If vague, provide a standard starting range.
3. Suggest 3-5 specific portfolio or case study files that should be attached to the email to prove capability.

Tone: Professional, helpful, enthusiastic, and reliable."#;

/// Top-level fields every reply plan must carry.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "emailSubject",
    "emailBody",
    "estimateLow",
    "estimateHigh",
    "currency",
    "pricingRationale",
    "suggestedAttachments",
];

/// Fields every attachment item must carry.
pub const ATTACHMENT_FIELDS: [&str; 3] = ["name", "reason", "fileType"];

/// Output schema in the Gemini `responseSchema` dialect (OpenAPI subset,
/// upper-case type names).
pub fn reply_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "emailSubject": {
                "type": "STRING",
                "description": "A professional and catchy email subject line."
            },
            "emailBody": {
                "type": "STRING",
                "description": "The full body of the email response. Polite, professional, and addressing the client's needs specifically."
            },
            "estimateLow": {
                "type": "NUMBER",
                "description": "The lower end of the estimated budget range."
            },
            "estimateHigh": {
                "type": "NUMBER",
                "description": "The higher end of the estimated budget range."
            },
            "currency": {
                "type": "STRING",
                "description": "Currency code (e.g., KRW, USD). Use KRW for Korean context."
            },
            "pricingRationale": {
                "type": "STRING",
                "description": "A brief explanation of how the estimate was calculated based on the inquiry details."
            },
            "suggestedAttachments": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING", "description": "Name of the file to attach." },
                        "reason": { "type": "STRING", "description": "Why this attachment is relevant." },
                        "fileType": { "type": "STRING", "description": "File extension (e.g., PDF, PPTX)." }
                    },
                    "required": ATTACHMENT_FIELDS
                }
            }
        },
        "required": REQUIRED_FIELDS
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_every_field() {
        let schema = reply_plan_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, REQUIRED_FIELDS);
        for field in REQUIRED_FIELDS {
            assert!(schema["properties"].get(field).is_some(), "{field}");
        }
    }

    #[test]
    fn test_attachment_items_require_all_fields() {
        let schema = reply_plan_schema();
        let items = &schema["properties"]["suggestedAttachments"]["items"];
        assert_eq!(items["type"], "OBJECT");
        assert_eq!(items["required"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_system_prompt_sets_persona_and_tasks() {
        assert!(REPLY_PLAN_SYSTEM.contains("Senior Account Manager"));
        assert!(REPLY_PLAN_SYSTEM.contains("KRW"));
        assert!(REPLY_PLAN_SYSTEM.contains("3-5"));
    }
}

//! Shared test data

use crate::reply::{AttachmentSuggestion, GeneratedResponse};

pub(crate) fn sample_reply() -> GeneratedResponse {
    GeneratedResponse {
        email_subject: "유튜브 영상 제작 견적 안내".into(),
        email_body: "안녕하세요. 문의 주셔서 감사합니다.\n\n아래와 같이 견적을 안내드립니다.".into(),
        estimate_low: 3_000_000.0,
        estimate_high: 8_000_000.0,
        currency: "KRW".into(),
        pricing_rationale: "기획, 촬영, 편집 단가 기준".into(),
        suggested_attachments: vec![
            AttachmentSuggestion {
                name: "회사소개서".into(),
                reason: "대행 역량 소개".into(),
                file_type: "PDF".into(),
            },
            AttachmentSuggestion {
                name: "브랜디드 콘텐츠 포트폴리오".into(),
                reason: "유사 예능형 콘텐츠 사례".into(),
                file_type: "PPTX".into(),
            },
            AttachmentSuggestion {
                name: "영상 제작 단가표".into(),
                reason: "견적 산출 근거".into(),
                file_type: "XLSX".into(),
            },
        ],
    }
}

//! Inquiry input form state

use crate::util::preview;

/// Example inquiries offered as one-key shortcuts.
pub const SAMPLE_INQUIRIES: [&str; 3] = [
    "새로 출시하는 화장품 브랜드의 인스타그램 인플루언서 마케팅 견적 문의합니다. 예산은 1000만원 정도이고 20대 여성이 타겟입니다.",
    "B2B SaaS 솔루션 검색 광고 대행 문의드립니다. 월 예산은 미정이고 ROAS 최적화가 목표입니다. 제안서 부탁드려요.",
    "유튜브 브랜디드 콘텐츠 영상 제작 단가가 궁금합니다. 10분 내외 예능형 콘텐츠로 3편 정도 생각중입니다.",
];

/// Characters of a sample shown in the picker before the ellipsis.
pub const SAMPLE_PREVIEW_CHARS: usize = 35;

pub const PLACEHOLDER: &str = "예: 이번에 새로 런칭하는 모바일 게임 마케팅 대행사를 찾고 있습니다. 구글 UAC랑 유튜브 광고 집행 예정이고 월 예산은 5천만원입니다...";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputForm {
    draft: String,
}

impl InputForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_empty(&self) -> bool {
        self.draft.is_empty()
    }

    /// Character count shown under the text area.
    pub fn char_count(&self) -> usize {
        self.draft.chars().count()
    }

    pub fn push(&mut self, c: char) {
        self.draft.push(c);
    }

    /// Append pasted text. Carriage returns from CRLF pastes are dropped.
    pub fn push_str(&mut self, text: &str) {
        self.draft.extend(text.chars().filter(|c| *c != '\r'));
    }

    pub fn pop(&mut self) {
        self.draft.pop();
    }

    /// Replace the draft with the full text of sample `index`.
    pub fn select_sample(&mut self, index: usize) -> bool {
        match SAMPLE_INQUIRIES.get(index) {
            Some(sample) => {
                self.draft = (*sample).to_string();
                true
            }
            None => false,
        }
    }

    /// Truncated label for the sample picker.
    pub fn sample_label(index: usize) -> Option<String> {
        SAMPLE_INQUIRIES
            .get(index)
            .map(|sample| preview(sample, SAMPLE_PREVIEW_CHARS))
    }

    /// Submission needs non-blank text and no request in flight.
    pub fn can_submit(&self, is_loading: bool) -> bool {
        !is_loading && !self.draft.trim().is_empty()
    }
}

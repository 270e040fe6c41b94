//! Structured reply generation
//!
//! Turns a raw client inquiry into a validated [`GeneratedResponse`] with a
//! single call to the Gemini `generateContent` API, constrained by a JSON
//! response schema.

pub mod client;
pub mod error;
pub mod models;
pub mod parse;
pub mod prompts;

pub use client::{GeminiClient, GenerationRequest, ReplyGenerator};
pub use error::GenerationError;
pub use models::{AttachmentSuggestion, GeneratedResponse, InquiryText, Usage};

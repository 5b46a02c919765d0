//! `DashScope` chat adapter
//!
//! Normalizes `DashScope` text-generation replies (single-shot and streamed)
//! into a vendor-agnostic chat response model: one result per vendor choice,
//! verbatim text, explicit token-usage accounting, and closed finish-reason
//! mapping. The transport is a thin reqwest client behind the [`DashScopeApi`]
//! trait so callers can substitute their own.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod api;
pub mod convert;
pub mod error;
pub mod model;
pub mod protocol;
pub mod types;

pub use api::{ChunkStream, DashScopeApi, DashScopeClient};
pub use error::ChatError;
pub use model::{ChatResponseStream, DEFAULT_MODEL, DashScopeChatModel, validate_prompt};
pub use types::{
    ChatOptions, ChatResponse, FinishReason, Generation, Message, Prompt, ResponseMetadata, Role,
    Usage,
};

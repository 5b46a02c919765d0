//! `DashScope` wire format types
//!
//! Mirrors the native text-generation endpoint
//! (`/services/aigc/text-generation/generation`), not the `OpenAI`-compatible
//! mode.

pub mod generation;

pub use generation::{
    ChatCompletion, ChatCompletionChunk, ChatCompletionFinishReason, ChatCompletionFunction,
    ChatCompletionMessage, ChatCompletionOutput, ChatCompletionRequest, ChatCompletionTool, Choice,
    RequestInput, RequestParameters, TokenUsage,
};

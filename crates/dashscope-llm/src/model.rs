//! Chat-model facade over the `DashScope` transport
//!
//! Validates prompts, merges options, builds the wire request, and normalizes
//! the vendor reply. Transport failures pass through untouched; all retry
//! behavior belongs to the caller.

use std::pin::Pin;
use std::sync::Arc;

use futures_util::{Stream, StreamExt};

use crate::api::DashScopeApi;
use crate::convert;
use crate::error::ChatError;
use crate::types::{ChatOptions, ChatResponse, Prompt};

/// Model used when neither the prompt nor the defaults name one
pub const DEFAULT_MODEL: &str = "qwen-plus";

/// Stream of normalized chat responses, one per vendor chunk
pub type ChatResponseStream = Pin<Box<dyn Stream<Item = Result<ChatResponse, ChatError>> + Send>>;

/// Chat model backed by the `DashScope` text-generation API
pub struct DashScopeChatModel {
    api: Arc<dyn DashScopeApi>,
    default_options: ChatOptions,
}

impl DashScopeChatModel {
    /// Create a model over the given transport with default options
    pub fn new(api: Arc<dyn DashScopeApi>, default_options: ChatOptions) -> Self {
        Self {
            api,
            default_options,
        }
    }

    /// Send a prompt and return the complete normalized response
    pub async fn call(&self, prompt: &Prompt) -> Result<ChatResponse, ChatError> {
        validate_prompt(Some(prompt))?;

        let options = self.default_options.merge(prompt.options.as_ref());
        let request = convert::completion_request(prompt, &options, resolve_model(&options));

        let completion = self.api.chat_completion(&request).await?;
        convert::chat_response(completion.as_ref())
    }

    /// Send a prompt and stream normalized responses as chunks arrive
    ///
    /// The returned stream is a lazy per-chunk transform: order is preserved,
    /// nothing is buffered, and dropping the stream stops all work.
    pub async fn stream(&self, prompt: &Prompt) -> Result<ChatResponseStream, ChatError> {
        validate_prompt(Some(prompt))?;

        let mut options = self.default_options.merge(prompt.options.as_ref());
        options.stream = true;
        let request = convert::completion_request(prompt, &options, resolve_model(&options));

        let chunks = self.api.chat_completion_stream(&request).await?;
        Ok(Box::pin(
            chunks.map(|item| item.map(|chunk| convert::chunk_response(&chunk))),
        ))
    }
}

/// Check a prompt before any transport work happens
///
/// An absent prompt and a prompt without messages both fail with
/// [`ChatError::InvalidRequest`].
pub fn validate_prompt(prompt: Option<&Prompt>) -> Result<(), ChatError> {
    let prompt = prompt
        .ok_or_else(|| ChatError::InvalidRequest("prompt must be present".to_owned()))?;

    if prompt.messages.is_empty() {
        return Err(ChatError::InvalidRequest(
            "prompt must contain at least one message".to_owned(),
        ));
    }

    Ok(())
}

fn resolve_model(options: &ChatOptions) -> String {
    options
        .model
        .clone()
        .unwrap_or_else(|| DEFAULT_MODEL.to_owned())
}

//! Transport boundary to the `DashScope` service

pub mod http;

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

use crate::error::ChatError;
use crate::protocol::{ChatCompletion, ChatCompletionChunk, ChatCompletionRequest};

pub use http::DashScopeClient;

/// Stream of incremental completion chunks from the transport
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<ChatCompletionChunk, ChatError>> + Send>>;

/// Low-level `DashScope` text-generation API
#[async_trait]
pub trait DashScopeApi: Send + Sync {
    /// Issue a single-shot completion request
    ///
    /// Returns `Ok(None)` when the service answers success with an empty body.
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<Option<ChatCompletion>, ChatError>;

    /// Issue a streaming completion request
    ///
    /// Chunks are yielded in arrival order; the stream ends when the service
    /// closes the event source.
    async fn chat_completion_stream(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChunkStream, ChatError>;
}

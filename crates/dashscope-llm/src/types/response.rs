use serde::{Deserialize, Serialize};

/// Reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of generation
    Stop,
    /// Hit the token limit
    Length,
    /// Model decided to call a tool
    ToolCalls,
}

/// Token usage statistics
///
/// Absent usage and all-zero usage are distinct: a response may carry a
/// `Usage` whose counts are all zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u32,
    /// Tokens generated in the completion
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion)
    pub total_tokens: u32,
}

/// One candidate completion in normalized form
///
/// When the finish reason is [`FinishReason::ToolCalls`] the content is the
/// raw JSON-encoded tool invocation (or one fragment of it when streaming),
/// passed through unchanged. Reassembly belongs to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    /// Assistant output text
    pub content: String,
    /// Why generation stopped, absent while a stream is in flight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

/// Metadata attached to a normalized response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Vendor request identifier, copied verbatim
    pub id: String,
    /// Token usage, present exactly when the vendor reported it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Normalized chat response consumed by the application layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Candidate completions, in vendor order
    pub results: Vec<Generation>,
    /// Response metadata
    pub metadata: ResponseMetadata,
}

impl ChatResponse {
    /// First result, if the vendor produced any
    pub fn result(&self) -> Option<&Generation> {
        self.results.first()
    }
}

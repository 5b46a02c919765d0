//! `DashScope` text-generation API wire format types

use serde::{Deserialize, Serialize};

// -- Request types --

/// `DashScope` chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Request input wrapper
    pub input: RequestInput,
    /// Generation parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<RequestParameters>,
}

/// Input wrapper within a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestInput {
    /// Conversation messages
    pub messages: Vec<ChatCompletionMessage>,
}

/// Generation parameters within a request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestParameters {
    /// Response structure; always "message" so replies arrive as choices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_format: Option<String>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Top-k sampling cutoff
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Random seed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Emit incremental fragments instead of cumulative text when streaming
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incremental_output: Option<bool>,
    /// Tool definitions available to the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ChatCompletionTool>>,
}

/// Tool definition on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionTool {
    /// Tool type (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function specification
    pub function: ChatCompletionFunction,
}

/// Function specification on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionFunction {
    /// Function name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

// -- Response types --

/// Complete (non-streamed) `DashScope` reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// Vendor request identifier
    pub request_id: String,
    /// Generated output
    pub output: ChatCompletionOutput,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

/// One incremental unit of a streamed reply
///
/// Same shape as [`ChatCompletion`]; usage is present only on the terminal
/// chunk of a stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    /// Vendor request identifier, repeated on every chunk
    pub request_id: String,
    /// Incremental output
    pub output: ChatCompletionOutput,
    /// Token usage (terminal chunk only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

/// Output block within a reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionOutput {
    /// Flattened text (populated in "text" result format)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Finish reason (populated in "text" result format)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<ChatCompletionFinishReason>,
    /// Candidate completions ("message" result format)
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One candidate completion within a reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// Why generation stopped; `null` while a stream is in flight
    #[serde(default)]
    pub finish_reason: Option<ChatCompletionFinishReason>,
    /// Generated message
    pub message: ChatCompletionMessage,
}

/// Message on the wire, in requests and response choices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionMessage {
    /// Author role
    pub role: String,
    /// Text content
    pub content: String,
}

/// Wire finish reasons
///
/// Closed set: a new vendor reason is a deserialization error, forcing an
/// explicit mapping decision rather than silent passthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatCompletionFinishReason {
    /// Natural end of generation
    Stop,
    /// Hit the token limit
    Length,
    /// Model requested a tool invocation
    ToolCalls,
    /// Generation still in progress (streaming chunks)
    Null,
}

/// Token usage in a reply
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens generated in the completion
    pub output_tokens: u32,
    /// Tokens consumed by the prompt
    pub input_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
    /// Image tokens (multimodal models)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_tokens: Option<u32>,
    /// Video tokens (multimodal models)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_tokens: Option<u32>,
    /// Audio tokens (multimodal models)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_tokens: Option<u32>,
}

impl TokenUsage {
    /// Usage carrying only the three core counts
    pub const fn new(output_tokens: u32, input_tokens: u32, total_tokens: u32) -> Self {
        Self {
            output_tokens,
            input_tokens,
            total_tokens,
            image_tokens: None,
            video_tokens: None,
            audio_tokens: None,
        }
    }
}

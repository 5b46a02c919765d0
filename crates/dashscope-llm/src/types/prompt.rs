use serde::{Deserialize, Serialize};

use super::message::Message;
use super::tool::ToolDefinition;

/// Unit of request to the model: ordered messages plus generation options
#[derive(Debug, Clone, Default)]
pub struct Prompt {
    /// Conversation messages, oldest first
    pub messages: Vec<Message>,
    /// Per-request options overriding the model defaults
    pub options: Option<ChatOptions>,
}

impl Prompt {
    /// Create a prompt from messages with no option overrides
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            options: None,
        }
    }

    /// Create a prompt carrying per-request options
    pub fn with_options(messages: Vec<Message>, options: ChatOptions) -> Self {
        Self {
            messages,
            options: Some(options),
        }
    }
}

/// Parameters controlling text generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatOptions {
    /// Model identifier (e.g. "qwen-plus")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Top-k sampling cutoff
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Random seed for reproducible generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Whether responses should be streamed
    #[serde(default)]
    pub stream: bool,
    /// Tool definitions available to the model, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
}

impl ChatOptions {
    /// Merge per-request overrides on top of these defaults
    ///
    /// Every field set on `overrides` wins; unset fields fall back to the
    /// default options.
    pub fn merge(&self, overrides: Option<&Self>) -> Self {
        let Some(overrides) = overrides else {
            return self.clone();
        };

        Self {
            model: overrides.model.clone().or_else(|| self.model.clone()),
            temperature: overrides.temperature.or(self.temperature),
            top_p: overrides.top_p.or(self.top_p),
            top_k: overrides.top_k.or(self.top_k),
            seed: overrides.seed.or(self.seed),
            max_tokens: overrides.max_tokens.or(self.max_tokens),
            stream: overrides.stream || self.stream,
            tools: overrides.tools.clone().or_else(|| self.tools.clone()),
        }
    }
}

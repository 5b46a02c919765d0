//! Pure mapping from `DashScope` replies to the normalized response model
//!
//! All functions here are side-effect free. Streamed chunks are mapped one at
//! a time with no cross-chunk state; reassembling tool-call fragments is the
//! caller's responsibility.

use crate::error::ChatError;
use crate::protocol::{
    ChatCompletion, ChatCompletionChunk, ChatCompletionFinishReason, ChatCompletionFunction,
    ChatCompletionMessage, ChatCompletionOutput, ChatCompletionRequest, ChatCompletionTool,
    RequestInput, RequestParameters, TokenUsage,
};
use crate::types::{
    ChatOptions, ChatResponse, FinishReason, Generation, Prompt, ResponseMetadata, Role, Usage,
};

/// Result format requesting choice-structured replies
const RESULT_FORMAT_MESSAGE: &str = "message";

/// Normalize a complete (non-streamed) vendor reply
///
/// One [`Generation`] per vendor choice, text copied verbatim, order
/// preserved. An empty choice list yields an empty result list without error;
/// usage is still surfaced when the vendor reported it, even all-zero.
pub fn chat_response(completion: Option<&ChatCompletion>) -> Result<ChatResponse, ChatError> {
    let completion = completion
        .ok_or_else(|| ChatError::InvalidRequest("chat completion must be present".to_owned()))?;

    Ok(ChatResponse {
        results: generations(&completion.output),
        metadata: ResponseMetadata {
            id: completion.request_id.clone(),
            usage: completion.usage.as_ref().map(Into::into),
        },
    })
}

/// Normalize one streamed chunk
///
/// Each chunk maps to exactly one response carrying only that chunk's text
/// fragment; usage appears only on the response for the chunk that carried it.
pub fn chunk_response(chunk: &ChatCompletionChunk) -> ChatResponse {
    ChatResponse {
        results: generations(&chunk.output),
        metadata: ResponseMetadata {
            id: chunk.request_id.clone(),
            usage: chunk.usage.as_ref().map(Into::into),
        },
    }
}

/// Build a wire request from a prompt and resolved options
pub fn completion_request(prompt: &Prompt, options: &ChatOptions, model: String) -> ChatCompletionRequest {
    let messages = prompt
        .messages
        .iter()
        .map(|m| ChatCompletionMessage {
            role: role_name(m.role).to_owned(),
            content: m.content.clone(),
        })
        .collect();

    let tools = options.tools.as_ref().map(|tools| {
        tools
            .iter()
            .map(|t| ChatCompletionTool {
                tool_type: t.tool_type.clone(),
                function: ChatCompletionFunction {
                    name: t.function.name.clone(),
                    description: t.function.description.clone(),
                    parameters: t.function.parameters.clone(),
                },
            })
            .collect()
    });

    ChatCompletionRequest {
        model,
        input: RequestInput { messages },
        parameters: Some(RequestParameters {
            result_format: Some(RESULT_FORMAT_MESSAGE.to_owned()),
            temperature: options.temperature,
            top_p: options.top_p,
            top_k: options.top_k,
            seed: options.seed,
            max_tokens: options.max_tokens,
            incremental_output: if options.stream { Some(true) } else { None },
            tools,
        }),
    }
}

fn generations(output: &ChatCompletionOutput) -> Vec<Generation> {
    output
        .choices
        .iter()
        .map(|choice| Generation {
            content: choice.message.content.clone(),
            finish_reason: choice.finish_reason.and_then(finish_reason),
        })
        .collect()
}

/// Map a wire finish reason into the normalized enum
///
/// `Null` marks an in-flight stream chunk and maps to absent.
const fn finish_reason(wire: ChatCompletionFinishReason) -> Option<FinishReason> {
    match wire {
        ChatCompletionFinishReason::Stop => Some(FinishReason::Stop),
        ChatCompletionFinishReason::Length => Some(FinishReason::Length),
        ChatCompletionFinishReason::ToolCalls => Some(FinishReason::ToolCalls),
        ChatCompletionFinishReason::Null => None,
    }
}

const fn role_name(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    }
}

impl From<&TokenUsage> for Usage {
    fn from(usage: &TokenUsage) -> Self {
        Self {
            prompt_tokens: usage.input_tokens,
            completion_tokens: usage.output_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Choice;
    use crate::types::{Message, ToolDefinition};

    fn completion(
        request_id: &str,
        choices: Vec<Choice>,
        usage: Option<TokenUsage>,
    ) -> ChatCompletion {
        ChatCompletion {
            request_id: request_id.to_owned(),
            output: ChatCompletionOutput {
                text: None,
                finish_reason: None,
                choices,
            },
            usage,
        }
    }

    fn choice(content: &str, finish_reason: Option<ChatCompletionFinishReason>) -> Choice {
        Choice {
            finish_reason,
            message: ChatCompletionMessage {
                role: "assistant".to_owned(),
                content: content.to_owned(),
            },
        }
    }

    #[test]
    fn single_choice_maps_to_single_result() {
        let reply = completion(
            "test-request-id",
            vec![choice(
                "I'm doing well, thank you for asking!",
                Some(ChatCompletionFinishReason::Stop),
            )],
            Some(TokenUsage::new(10, 5, 15)),
        );

        let response = chat_response(Some(&reply)).unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(
            response.result().unwrap().content,
            "I'm doing well, thank you for asking!"
        );
        assert_eq!(response.result().unwrap().finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.metadata.id, "test-request-id");
        assert_eq!(response.metadata.usage.as_ref().unwrap().total_tokens, 15);
    }

    #[test]
    fn choices_preserve_order() {
        let reply = completion(
            "id",
            vec![
                choice("first", Some(ChatCompletionFinishReason::Stop)),
                choice("second", Some(ChatCompletionFinishReason::Stop)),
                choice("third", Some(ChatCompletionFinishReason::Length)),
            ],
            None,
        );

        let response = chat_response(Some(&reply)).unwrap();

        let texts: Vec<_> = response.results.iter().map(|g| g.content.as_str()).collect();
        assert_eq!(texts, ["first", "second", "third"]);
        assert_eq!(response.results[2].finish_reason, Some(FinishReason::Length));
    }

    #[test]
    fn empty_choices_yield_empty_results_with_zero_usage() {
        let reply = completion("test-id", vec![], Some(TokenUsage::new(0, 0, 0)));

        let response = chat_response(Some(&reply)).unwrap();

        assert!(response.results.is_empty());
        let usage = response.metadata.usage.expect("zero usage is still present");
        assert_eq!(usage.prompt_tokens, 0);
        assert_eq!(usage.completion_tokens, 0);
        assert_eq!(usage.total_tokens, 0);
    }

    #[test]
    fn absent_usage_stays_absent() {
        let reply = completion("id", vec![choice("hi", None)], None);

        let response = chat_response(Some(&reply)).unwrap();

        assert!(response.metadata.usage.is_none());
    }

    #[test]
    fn usage_swaps_input_output_into_prompt_completion() {
        let reply = completion(
            "id",
            vec![choice("hi", Some(ChatCompletionFinishReason::Stop))],
            Some(TokenUsage::new(10, 5, 15)),
        );

        let usage = chat_response(Some(&reply)).unwrap().metadata.usage.unwrap();

        assert_eq!(usage.prompt_tokens, 5);
        assert_eq!(usage.completion_tokens, 10);
        assert_eq!(usage.total_tokens, 15);
    }

    #[test]
    fn empty_request_id_copied_verbatim() {
        let reply = completion("", vec![], None);

        let response = chat_response(Some(&reply)).unwrap();

        assert_eq!(response.metadata.id, "");
    }

    #[test]
    fn absent_completion_is_invalid_request() {
        let err = chat_response(None).unwrap_err();

        assert!(matches!(&err, ChatError::InvalidRequest(m) if m.contains("completion")));
    }

    #[test]
    fn tool_call_content_passes_through_unchanged() {
        let payload = r#"{"name": "get_weather", "arguments": "{\"location\": \"Beijing\"}"}"#;
        let reply = completion(
            "test-id",
            vec![choice(payload, Some(ChatCompletionFinishReason::ToolCalls))],
            Some(TokenUsage::new(10, 5, 15)),
        );

        let response = chat_response(Some(&reply)).unwrap();

        assert_eq!(response.result().unwrap().content, payload);
        assert_eq!(
            response.result().unwrap().finish_reason,
            Some(FinishReason::ToolCalls)
        );
    }

    #[test]
    fn in_flight_chunk_has_no_finish_reason() {
        let chunk = ChatCompletionChunk {
            request_id: "id".to_owned(),
            output: ChatCompletionOutput {
                text: Some("I'm ".to_owned()),
                finish_reason: None,
                choices: vec![choice("I'm ", Some(ChatCompletionFinishReason::Null))],
            },
            usage: None,
        };

        let response = chunk_response(&chunk);

        assert_eq!(response.result().unwrap().content, "I'm ");
        assert!(response.result().unwrap().finish_reason.is_none());
        assert!(response.metadata.usage.is_none());
    }

    #[test]
    fn terminal_chunk_carries_usage() {
        let chunk = ChatCompletionChunk {
            request_id: "id".to_owned(),
            output: ChatCompletionOutput {
                text: Some("well!".to_owned()),
                finish_reason: None,
                choices: vec![choice("well!", Some(ChatCompletionFinishReason::Stop))],
            },
            usage: Some(TokenUsage::new(10, 5, 15)),
        };

        let response = chunk_response(&chunk);

        assert_eq!(response.metadata.usage.as_ref().unwrap().total_tokens, 15);
        assert_eq!(
            response.result().unwrap().finish_reason,
            Some(FinishReason::Stop)
        );
    }

    #[test]
    fn request_carries_roles_and_parameters() {
        let prompt = Prompt::new(vec![
            Message::system("You are a helpful assistant."),
            Message::user("Hello, how are you?"),
        ]);
        let options = ChatOptions {
            temperature: Some(0.7),
            top_p: Some(0.8),
            top_k: Some(50),
            seed: Some(1234),
            ..ChatOptions::default()
        };

        let request = completion_request(&prompt, &options, "qwen-turbo".to_owned());

        assert_eq!(request.model, "qwen-turbo");
        assert_eq!(request.input.messages.len(), 2);
        assert_eq!(request.input.messages[0].role, "system");
        assert_eq!(request.input.messages[1].role, "user");

        let parameters = request.parameters.unwrap();
        assert_eq!(parameters.result_format.as_deref(), Some("message"));
        assert_eq!(parameters.temperature, Some(0.7));
        assert_eq!(parameters.top_k, Some(50));
        assert_eq!(parameters.seed, Some(1234));
        assert!(parameters.incremental_output.is_none());
    }

    #[test]
    fn streaming_request_asks_for_incremental_output() {
        let prompt = Prompt::new(vec![Message::user("hi")]);
        let options = ChatOptions {
            stream: true,
            ..ChatOptions::default()
        };

        let request = completion_request(&prompt, &options, "qwen-plus".to_owned());

        assert_eq!(
            request.parameters.unwrap().incremental_output,
            Some(true)
        );
    }

    #[test]
    fn tool_definitions_pass_through_untouched() {
        let schema = serde_json::json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "properties": {}
        });
        let prompt = Prompt::new(vec![Message::user("What's the weather like?")]);
        let options = ChatOptions {
            tools: Some(vec![ToolDefinition::function(
                "get_weather",
                "Get weather information",
                schema.clone(),
            )]),
            ..ChatOptions::default()
        };

        let request = completion_request(&prompt, &options, "qwen-turbo".to_owned());

        let tools = request.parameters.unwrap().tools.unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].tool_type, "function");
        assert_eq!(tools[0].function.name, "get_weather");
        assert_eq!(tools[0].function.parameters.as_ref(), Some(&schema));
    }
}

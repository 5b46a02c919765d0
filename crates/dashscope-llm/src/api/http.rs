//! Reqwest-backed `DashScope` client

use async_trait::async_trait;
use dashscope_config::ClientConfig;
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{ChunkStream, DashScopeApi};
use crate::error::ChatError;
use crate::protocol::{ChatCompletion, ChatCompletionChunk, ChatCompletionRequest};

/// Default `DashScope` API base URL
const DEFAULT_BASE_URL: &str = "https://dashscope.aliyuncs.com/api/v1";

/// Header enabling server-sent-event streaming on the generation endpoint
const SSE_HEADER: &str = "X-DashScope-SSE";

/// HTTP client for the `DashScope` text-generation endpoint
pub struct DashScopeClient {
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl DashScopeClient {
    /// Create from client configuration
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never happen).
    pub fn new(config: &ClientConfig) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).expect("valid default URL"));

        Self {
            client: Client::new(),
            base_url,
            api_key: config.api_key.clone(),
        }
    }

    /// Build the text-generation URL
    fn generation_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/services/aigc/text-generation/generation")
    }

    fn request_builder(&self, request: &ChatCompletionRequest) -> reqwest::RequestBuilder {
        let mut builder = self.client.post(self.generation_url()).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }
        builder
    }
}

#[async_trait]
impl DashScopeApi for DashScopeClient {
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<Option<ChatCompletion>, ChatError> {
        let response = self.request_builder(request).send().await.map_err(|e| {
            tracing::error!(error = %e, "dashscope request failed");
            ChatError::Upstream(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "dashscope returned error");
            return Err(ChatError::Upstream(format!("service returned {status}: {body}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ChatError::Upstream(e.to_string()))?;

        // A success status with no body maps to an absent completion
        if body.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| ChatError::Upstream(format!("failed to parse response: {e}")))
    }

    async fn chat_completion_stream(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChunkStream, ChatError> {
        let response = self
            .request_builder(request)
            .header(SSE_HEADER, "enable")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "dashscope stream request failed");
                ChatError::Upstream(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Upstream(format!("service returned {status}: {body}")));
        }

        let event_stream = response.bytes_stream().eventsource();

        let mapped = event_stream
            .map(|result| match result {
                Ok(event) => {
                    let data = event.data.trim().to_owned();
                    match serde_json::from_str::<ChatCompletionChunk>(&data) {
                        Ok(chunk) => vec![Ok(chunk)],
                        Err(e) => {
                            tracing::debug!(error = %e, data = %data, "skipping unparseable SSE chunk");
                            vec![]
                        }
                    }
                }
                Err(e) => vec![Err(ChatError::Streaming(e.to_string()))],
            })
            .flat_map(futures_util::stream::iter);

        Ok(Box::pin(mapped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_url_tolerates_trailing_slash() {
        let config = ClientConfig {
            api_key: None,
            base_url: Some(Url::parse("https://example.com/api/v1/").unwrap()),
        };
        let client = DashScopeClient::new(&config);

        assert_eq!(
            client.generation_url(),
            "https://example.com/api/v1/services/aigc/text-generation/generation"
        );
    }

    #[test]
    fn default_base_url_points_at_dashscope() {
        let client = DashScopeClient::new(&ClientConfig::default());

        assert!(client.generation_url().starts_with("https://dashscope.aliyuncs.com/api/v1/"));
    }
}

//! OpenAI-style chat completions endpoint with character mode

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::application::errors::AiError;
use crate::infrastructure::llm::{AiConfig, AiResult, ChatBackend, ChatCompletion, ChatRequest};

/// Log target for full payload logging
pub const AI_DEBUG_TARGET: &str = "ai_debug";

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// HTTP completion provider
pub struct CompletionsProvider {
    endpoint: String,
    client: Client,
    debug: bool,
}

impl CompletionsProvider {
    pub fn new(config: &AiConfig) -> AiResult<Self> {
        let endpoint = config
            .endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or(AiError::NotConfigured)?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AiError::Network(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
            debug: config.debug,
        })
    }

    /// Full URL of the completions endpoint
    pub fn url(&self) -> String {
        format!("{}{}", self.endpoint, COMPLETIONS_PATH)
    }
}

#[async_trait]
impl ChatBackend for CompletionsProvider {
    fn name(&self) -> &str {
        "completions"
    }

    async fn complete(&self, request: &ChatRequest) -> AiResult<String> {
        let body = serde_json::to_string(request)
            .map_err(|e| AiError::Parse(e.to_string()))?;

        if self.debug {
            tracing::debug!(target: AI_DEBUG_TARGET, "request: {}", body);
        }

        let response = self.client
            .post(self.url())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        if self.debug {
            tracing::debug!(target: AI_DEBUG_TARGET, "response ({}): {}", status, text);
        }

        if !status.is_success() {
            return Err(AiError::Network(format!("AI endpoint returned {}: {}", status, text)));
        }

        ChatCompletion::first_content(&text)
    }
}

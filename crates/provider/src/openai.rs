//! OpenAI Chat Backend
//!
//! Chat completions over the OpenAI-compatible HTTP API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::chat::{ChatParams, ChatResponse, ToolCall};
use crate::{ChatProvider, ProviderError, Result};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI chat-completions provider
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    api_base: String,
    default_model: String,
}

impl OpenAiProvider {
    pub fn new(
        api_key: impl Into<String>,
        api_base: Option<String>,
        default_model: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            default_model: default_model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    fn build_request(&self, params: &ChatParams) -> Value {
        // Message and Tool serialize to the wire shape directly
        let mut body = json!({
            "model": params.model,
            "messages": params.messages,
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
        });

        if !params.tools.is_empty() {
            body["tools"] = json!(params.tools);
            body["tool_choice"] = params.tool_choice.to_wire();
        }

        body
    }

    fn parse_response(&self, payload: Value) -> Result<ChatResponse> {
        let choice = payload["choices"]
            .get(0)
            .ok_or(ProviderError::InvalidResponse)?;
        let message = &choice["message"];

        let tool_calls = message["tool_calls"]
            .as_array()
            .map(|calls| calls.iter().map(parse_tool_call).collect())
            .unwrap_or_default();

        Ok(ChatResponse {
            content: message["content"].as_str().map(str::to_string),
            tool_calls,
            finish_reason: choice["finish_reason"]
                .as_str()
                .unwrap_or("stop")
                .to_string(),
            usage: serde_json::from_value(payload["usage"].clone()).unwrap_or_default(),
        })
    }
}

fn parse_tool_call(call: &Value) -> ToolCall {
    let function = &call["function"];
    // Arguments usually arrive as a JSON string; some gateways inline the object
    let arguments = match function["arguments"].as_str() {
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|_| function["arguments"].clone()),
        None => function["arguments"].clone(),
    };

    ToolCall {
        id: call["id"].as_str().unwrap_or("").to_string(),
        name: function["name"].as_str().unwrap_or("").to_string(),
        arguments,
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn chat(&self, params: ChatParams) -> Result<ChatResponse> {
        trace!(
            "chat request: {} messages, {} tools",
            params.messages.len(),
            params.tools.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&self.build_request(&params))
            .send()
            .await?;

        let status = response.status();
        let payload: Value = response.json().await?;

        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            let detail = payload["error"]["message"]
                .as_str()
                .unwrap_or("unknown error");
            return Err(ProviderError::Api(detail.to_string()));
        }

        let parsed = self.parse_response(payload)?;
        debug!(
            "chat completion: finish_reason={}, tool_calls={}",
            parsed.finish_reason,
            parsed.tool_calls.len()
        );

        Ok(parsed)
    }

    fn default_model(&self) -> String {
        self.default_model.clone()
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

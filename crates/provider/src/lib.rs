//! LLM Provider Layer
//!
//! Chat-completion and image-generation access for Based Agent.

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

pub mod chat;
pub mod images;
pub mod openai;

pub use chat::{
    ChatParams, ChatResponse, FunctionCall, FunctionDef, Message, Tool, ToolCall, ToolCallDef,
    ToolChoice, Usage,
};
pub use images::{GeneratedImage, ImageParams, ImageProvider, OpenAiImageProvider};
pub use openai::OpenAiProvider;

/// Provider errors
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("no API key configured")]
    NoApiKey,

    #[error("API error: {0}")]
    Api(String),

    #[error("rate limited")]
    RateLimited,

    #[error("malformed response")]
    InvalidResponse,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Chat completion backend
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn chat(&self, params: ChatParams) -> Result<ChatResponse>;
    fn default_model(&self) -> String;
    fn is_configured(&self) -> bool;
}

/// Build a JSON schema for an object of string properties.
///
/// Each entry is (name, description, required). Tools with non-string
/// arguments write their schema by hand instead.
pub fn object_schema(properties: &[(&str, &str, bool)]) -> Value {
    let props: serde_json::Map<String, Value> = properties
        .iter()
        .map(|(name, description, _)| {
            let spec = json!({ "type": "string", "description": description });
            (name.to_string(), spec)
        })
        .collect();
    let required: Vec<&str> = properties
        .iter()
        .filter(|(_, _, required)| *required)
        .map(|(name, _, _)| *name)
        .collect();

    json!({
        "type": "object",
        "properties": props,
        "required": required,
    })
}

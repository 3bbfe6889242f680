//! Image Generation
//!
//! DALL-E image generation over the OpenAI images API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::{ProviderError, Result};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Image request parameters
#[derive(Debug, Clone)]
pub struct ImageParams {
    pub model: String,
    pub prompt: String,
    pub size: String,
    pub quality: String,
}

impl Default for ImageParams {
    fn default() -> Self {
        Self {
            model: "dall-e-3".to_string(),
            prompt: String::new(),
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
        }
    }
}

impl ImageParams {
    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

/// One generated image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

/// Image generation backend
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn generate(&self, params: ImageParams) -> Result<GeneratedImage>;
    fn is_configured(&self) -> bool;
}

/// OpenAI images provider
pub struct OpenAiImageProvider {
    client: Client,
    api_key: String,
    api_base: String,
}

impl OpenAiImageProvider {
    pub fn new(api_key: impl Into<String>, api_base: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    fn build_request(&self, params: &ImageParams) -> Value {
        json!({
            "model": params.model,
            "prompt": params.prompt,
            "n": 1,
            "size": params.size,
            "quality": params.quality,
        })
    }

    fn parse_response(&self, payload: Value) -> Result<GeneratedImage> {
        let entry = payload["data"]
            .get(0)
            .ok_or(ProviderError::InvalidResponse)?;
        let url = entry["url"]
            .as_str()
            .ok_or(ProviderError::InvalidResponse)?
            .to_string();

        Ok(GeneratedImage {
            url,
            revised_prompt: entry["revised_prompt"].as_str().map(str::to_string),
        })
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    async fn generate(&self, params: ImageParams) -> Result<GeneratedImage> {
        trace!("image request: model={}, size={}", params.model, params.size);

        let response = self
            .client
            .post(format!("{}/images/generations", self.api_base))
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

        debug!("image generated with model {}", params.model);

        self.parse_response(payload)
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

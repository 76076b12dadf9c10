//! Gemini REST uplink
//!
//! Speaks the `generateContent` endpoint of the Generative Language API.

use super::types::{GenerateContentRequest, GenerateContentResponse};
use super::GenerativeUplink;
use crate::config::Config;
use crate::error::{RedtermError, RedtermResult};
use async_trait::async_trait;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct GeminiUplink {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiUplink {
    pub fn new(config: &Config) -> RedtermResult<Self> {
        let api_key = Config::api_key()
            .map_err(|e| RedtermError::Config(e.to_string()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl GenerativeUplink for GeminiUplink {
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> RedtermResult<GenerateContentResponse> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            warn!("❌ Uplink API Error ({}): {}", status, body_text);
            return Err(RedtermError::Transport {
                status: status.as_u16(),
                body: body_text,
            });
        }

        debug!("📡 Uplink raw body: {} bytes", body_text.len());

        Ok(serde_json::from_str(&body_text)?)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

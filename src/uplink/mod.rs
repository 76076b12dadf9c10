//! Uplink Module
//!
//! Transport layer carrying composed requests to the hosted
//! generative-language API.

use crate::config::Config;
use crate::error::RedtermResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub mod gemini;
pub mod types;

pub use types::{GenerateContentRequest, GenerateContentResponse};

/// Trait for generative uplinks
#[async_trait]
pub trait GenerativeUplink: Send + Sync + std::fmt::Debug {
    /// Run one `generateContent` call against the named model
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> RedtermResult<GenerateContentResponse>;

    /// Get the uplink name
    fn name(&self) -> &str;
}

/// Create the configured uplink
pub fn create_uplink(config: &Config) -> RedtermResult<Arc<dyn GenerativeUplink>> {
    let uplink = gemini::GeminiUplink::new(config)?;
    info!("📡 Uplink '{}' initialized ({})", uplink.name(), config.api_base_url);
    Ok(Arc::new(uplink))
}

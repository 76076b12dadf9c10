use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Remote model identifiers, one per routing role.
///
/// Kept in config so deployments can track provider model renames
/// without a rebuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCatalog {
    /// Default text model (Mentor, CVE Hunter)
    pub standard: String,
    /// Lowest-latency variant (Speed Ops)
    pub fast: String,
    /// Highest-capability reasoning model (Deep Analysis)
    pub reasoning: String,
    /// Highest-capability multimodal model (attachment routing)
    pub multimodal: String,
    /// Speech synthesis model
    pub speech: String,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            standard: "gemini-2.5-flash".to_string(),
            fast: "gemini-2.5-flash-lite-latest".to_string(),
            reasoning: "gemini-3-pro-preview".to_string(),
            multimodal: "gemini-3-pro-preview".to_string(),
            speech: "gemini-2.5-flash-preview-tts".to_string(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Uplink
    pub api_base_url: String,
    pub models: ModelCatalog,

    // Speech
    pub speech_enabled: bool,
    pub voice: String,
    pub speech_char_limit: usize,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://generativelanguage.googleapis.com".to_string(),
            models: ModelCatalog::default(),
            speech_enabled: false,
            voice: "Fenrir".to_string(),
            speech_char_limit: crate::speech::SPEECH_CHAR_LIMIT,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let config_path = config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            match serde_json::from_str(&content) {
                Ok(config) => Ok(config),
                Err(e) => {
                    // Graceful degradation: log warning and use defaults
                    tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                    // Backup corrupt file for debugging
                    let backup_path = config_path.with_extension("json.corrupt");
                    let _ = std::fs::rename(&config_path, &backup_path);
                    Ok(Self::default())
                }
            }
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let config_path = config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Read the provider API key from the environment.
    ///
    /// The key is deliberately never part of the config file.
    pub fn api_key() -> Result<String> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => anyhow::bail!("GEMINI_API_KEY is not set"),
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("redterm")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.models.standard, "gemini-2.5-flash");
        assert_eq!(config.models.fast, "gemini-2.5-flash-lite-latest");
        assert_eq!(config.voice, "Fenrir");
        assert_eq!(config.speech_char_limit, 300);
        assert!(!config.speech_enabled);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).expect("Failed to serialize");
        let restored: Config = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(config.api_base_url, restored.api_base_url);
        assert_eq!(config.models.reasoning, restored.models.reasoning);
    }

    #[test]
    fn test_config_corrupt_json_handling() {
        // Config::load uses graceful degradation - this tests the parsing path
        let corrupt_json = "{ not valid json";
        let result: Result<Config, _> = serde_json::from_str(corrupt_json);
        assert!(result.is_err());
    }
}

//! Speech Synthesis Bridge
//!
//! Best-effort voice channel for finalized replies. The bridge asks the
//! provider for raw PCM speech, decodes it, and queues it on the sound
//! engine. Every failure is logged and swallowed here: speech is an
//! enhancement, never part of the primary response path.

use crate::audio::{pcm, SoundEngine};
use crate::config::Config;
use crate::error::{RedtermError, RedtermResult};
use crate::uplink::types::{Content, GenerateContentRequest, GenerationConfig, Part, SpeechConfig};
use crate::uplink::GenerativeUplink;
use base64::Engine as _;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Maximum characters sent to synthesis. Deliberate lossy truncation to
/// bound synthesis latency, not an error condition.
pub const SPEECH_CHAR_LIMIT: usize = 300;

/// Clip text to the synthesis limit on a character boundary
fn clip_for_speech(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Bridge from finalized reply text to audible speech
pub struct SpeechSynthesizer {
    uplink: Arc<dyn GenerativeUplink>,
    model: String,
    voice: String,
    char_limit: usize,
    /// Process-wide playback handle, created on first use and reused for
    /// every later call. Never reset or torn down.
    engine: OnceLock<SoundEngine>,
}

impl std::fmt::Debug for SpeechSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechSynthesizer")
            .field("model", &self.model)
            .field("voice", &self.voice)
            .finish()
    }
}

impl SpeechSynthesizer {
    pub fn new(uplink: Arc<dyn GenerativeUplink>, config: &Config) -> Self {
        Self {
            uplink,
            model: config.models.speech.clone(),
            voice: config.voice.clone(),
            char_limit: config.speech_char_limit,
            engine: OnceLock::new(),
        }
    }

    fn engine(&self) -> RedtermResult<&SoundEngine> {
        if self.engine.get().is_none() {
            let created = SoundEngine::new().map_err(|e| RedtermError::Audio(e.to_string()))?;
            // A concurrent initializer winning the race is fine; both
            // handles point at a live audio thread.
            let _ = self.engine.set(created);
        }
        self.engine
            .get()
            .ok_or_else(|| RedtermError::Audio("Sound engine unavailable".to_string()))
    }

    /// Speak the given text, best effort. Never fails the caller.
    pub async fn speak(&self, text: &str) {
        if let Err(e) = self.try_speak(text).await {
            warn!("🔇 Speech synthesis failed: {}", e);
        }
    }

    async fn try_speak(&self, text: &str) -> RedtermResult<()> {
        let clipped = clip_for_speech(text, self.char_limit);

        let request = GenerateContentRequest {
            contents: vec![Content::from_text(clipped)],
            generation_config: Some(GenerationConfig {
                thinking_config: None,
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig::prebuilt_voice(self.voice.clone())),
            }),
            ..Default::default()
        };

        let response = self.uplink.generate(&self.model, &request).await?;

        let encoded = response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| {
                content.parts.iter().find_map(|part| match part {
                    Part::InlineData { inline_data } => Some(inline_data.data.as_str()),
                    _ => None,
                })
            })
            .ok_or_else(|| RedtermError::Synthesis("No audio payload in response".to_string()))?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| RedtermError::Synthesis(format!("Audio payload decode failed: {}", e)))?;

        let samples = pcm::decode_pcm16le(&bytes);
        debug!("🔉 Synthesized {} samples", samples.len());

        self.engine()?
            .play_samples(samples, pcm::SPEECH_SAMPLE_RATE)
            .map_err(|e| RedtermError::Audio(e.to_string()))
    }
}

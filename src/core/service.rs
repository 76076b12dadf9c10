//! Chat Turn Orchestration
//!
//! Drives a single turn end to end: compose the request plan, flag the
//! thinking indicator, invoke the uplink, clear the indicator, normalize.
//! Transport failures are re-raised untouched for the caller to render.

use super::composer::{compose, Attachment, Mode};
use super::normalizer::{normalize, NormalizedReply};
use crate::config::ModelCatalog;
use crate::error::RedtermResult;
use crate::uplink::GenerativeUplink;
use std::sync::Arc;
use tracing::debug;

/// Callback driving the caller's busy indicator
pub type ThinkingObserver = Arc<dyn Fn(bool) + Send + Sync>;

/// One-turn chat orchestrator
pub struct ChatService {
    uplink: Arc<dyn GenerativeUplink>,
    models: ModelCatalog,
    on_thinking: Option<ThinkingObserver>,
}

impl ChatService {
    pub fn new(uplink: Arc<dyn GenerativeUplink>, models: ModelCatalog) -> Self {
        Self {
            uplink,
            models,
            on_thinking: None,
        }
    }

    /// Register the busy-indicator observer
    pub fn set_thinking_observer(&mut self, observer: ThinkingObserver) {
        self.on_thinking = Some(observer);
    }

    fn signal_thinking(&self, active: bool) {
        if let Some(observer) = &self.on_thinking {
            observer(active);
        }
    }

    /// Run one chat turn.
    ///
    /// The observer receives exactly one `true` before the uplink call and
    /// exactly one `false` after its terminal outcome, success or failure,
    /// so a busy indicator can never get stuck.
    pub async fn send(
        &self,
        prompt: &str,
        mode: Mode,
        attachment: Option<Attachment>,
    ) -> RedtermResult<NormalizedReply> {
        let plan = compose(prompt, mode, attachment.as_ref(), &self.models);
        debug!(
            "🧭 Routed turn to '{}' (tools: {}, thinking budget: {:?})",
            plan.model, plan.tools_enabled, plan.thinking_budget
        );
        let request = plan.to_request();

        self.signal_thinking(true);
        let outcome = self.uplink.generate(&plan.model, &request).await;
        self.signal_thinking(false);

        let raw = outcome?;
        Ok(normalize(&raw))
    }
}

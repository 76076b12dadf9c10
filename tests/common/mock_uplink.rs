//! Mock Uplink for Testing
//!
//! Records every request for verification and replays a canned response.

use async_trait::async_trait;
use redterm::error::{RedtermError, RedtermResult};
use redterm::uplink::types::{GenerateContentRequest, GenerateContentResponse};
use redterm::uplink::GenerativeUplink;
use std::sync::{Arc, Mutex};

/// Mock uplink replaying canned provider responses
#[derive(Debug)]
pub struct MockUplink {
    /// (model, serialized request) for every call made
    pub calls: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
    /// Raw response replayed on each call
    pub response: serde_json::Value,
    /// Simulate transport failure on every call
    pub should_fail: Arc<Mutex<bool>>,
}

impl MockUplink {
    pub fn new(response: serde_json::Value) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response,
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Mock that answers every call with a plain text reply
    pub fn with_text(text: &str) -> Self {
        Self::new(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        }))
    }

    /// Mock that fails every call with a transport error
    pub fn failing() -> Self {
        let mock = Self::with_text("unreachable");
        *mock.should_fail.lock().unwrap() = true;
        mock
    }

    /// Get all recorded (model, request) pairs
    pub fn get_calls(&self) -> Vec<(String, serde_json::Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeUplink for MockUplink {
    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> RedtermResult<GenerateContentResponse> {
        self.calls.lock().unwrap().push((
            model.to_string(),
            serde_json::to_value(request).expect("Request must serialize"),
        ));

        if *self.should_fail.lock().unwrap() {
            return Err(RedtermError::Transport {
                status: 503,
                body: "mock uplink outage".to_string(),
            });
        }

        Ok(serde_json::from_value(self.response.clone()).expect("Canned response must parse"))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_uplink_records_calls() {
        let mock = MockUplink::with_text("ack");
        let request = GenerateContentRequest::default();

        mock.generate("model-a", &request).await.unwrap();
        mock.generate("model-b", &request).await.unwrap();

        let calls = mock.get_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "model-a");
        assert_eq!(calls[1].0, "model-b");
    }
}

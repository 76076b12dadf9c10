//! Response Normalization
//!
//! Flattens the provider's heterogeneous response shapes into a uniform
//! reply: plain text plus an ordered citation list. Missing fields are
//! never an error here; every absence has a defined default.

use crate::uplink::types::{GenerateContentResponse, Part};

/// Substituted when the provider returns no usable text.
pub const FALLBACK_TEXT: &str = "No response generated.";

/// External source the provider grounded an answer on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub uri: String,
    pub title: String,
}

/// Uniform result of one generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedReply {
    pub text: String,
    /// Provider order preserved: first-seen is most relevant. Duplicates
    /// are passed through untouched.
    pub citations: Vec<Citation>,
}

/// Normalize a raw provider response
pub fn normalize(response: &GenerateContentResponse) -> NormalizedReply {
    NormalizedReply {
        text: extract_text(response),
        citations: extract_citations(response),
    }
}

fn extract_text(response: &GenerateContentResponse) -> String {
    let text: String = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| match part {
                    Part::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        FALLBACK_TEXT.to_string()
    } else {
        text
    }
}

fn extract_citations(response: &GenerateContentResponse) -> Vec<Citation> {
    let chunks = match response
        .candidates
        .first()
        .and_then(|candidate| candidate.grounding_metadata.as_ref())
    {
        Some(metadata) => &metadata.grounding_chunks,
        None => return Vec::new(),
    };

    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            web.uri.as_ref().map(|uri| Citation {
                uri: uri.clone(),
                title: web.title.clone().unwrap_or_else(|| uri.clone()),
            })
        })
        .collect()
}

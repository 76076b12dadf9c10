//! Message History Types
//!
//! The console owns a flat, append-only, in-memory message list for the
//! lifetime of the process; these are its record types.

use crate::core::normalizer::Citation;
use chrono::{DateTime, Local};
use uuid::Uuid;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
    System,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
            Sender::System => "sys",
        }
    }
}

/// One entry in the session transcript
#[derive(Debug, Clone)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
    pub is_error: bool,
    pub citations: Vec<Citation>,
}

impl Message {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: Local::now(),
            is_error: false,
            citations: Vec::new(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            citations,
            ..Self::new(Sender::Bot, text)
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Sender::System, text)
    }

    /// System-level failure notice kept in the transcript, not thrown away
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::new(Sender::System, text)
        }
    }
}

//! # Chat Transcript (`common::chatbot::transcript`)
//!
//! File: cli/src/common/chatbot/transcript.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! An in-memory, append-only log of one conversation. Messages get sequential
//! ids and a UTC timestamp; nothing is ever persisted.
//!
use super::catalog::WELCOME_MESSAGE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One line of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Ordered conversation log. Messages can be added but never edited or removed.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript that opens with the bot's greeting.
    pub fn with_welcome() -> Self {
        let mut transcript = Self::new();
        transcript.push(Sender::Bot, WELCOME_MESSAGE);
        transcript
    }

    /// Appends a message and returns it.
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> &ChatMessage {
        let id = self.messages.len() as u64 + 1;
        self.messages.push(ChatMessage {
            id,
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_starts_with_welcome() {
        let transcript = Transcript::with_welcome();
        assert_eq!(transcript.len(), 1);
        let first = &transcript.messages()[0];
        assert_eq!(first.sender, Sender::Bot);
        assert_eq!(first.text, WELCOME_MESSAGE);
        assert_eq!(first.id, 1);
    }

    #[test]
    fn test_push_keeps_order_and_ids() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());
        transcript.push(Sender::User, "hello");
        transcript.push(Sender::Bot, "hi");
        let ids: Vec<_> = transcript.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(transcript.last().map(|m| m.sender), Some(Sender::Bot));
        assert!(transcript.messages()[0].timestamp <= transcript.messages()[1].timestamp);
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
    }
}

//! # FAQ Catalog (`common::chatbot::catalog`)
//!
//! File: cli/src/common/chatbot/catalog.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The built-in question/answer records, the fallback replies used when
//! nothing matches, and the greeting that opens every transcript.
//!
use serde::{Deserialize, Serialize};

/// Greeting the bot posts when a conversation starts.
pub const WELCOME_MESSAGE: &str =
    "👋 Hi there! I'm your language learning assistant. How can I help you today?";

/// Replies used when no entry scores above the threshold.
pub const FALLBACK_RESPONSES: [&str; 5] = [
    "I'm sorry, I don't understand that question. Could you rephrase it or ask about time zones, scheduling, or language settings?",
    "I'm not sure I understand. You can ask me about scheduling sessions, managing time zones, or updating your language preferences.",
    "I don't have that information. Try asking about session scheduling, time zone conversion, or language learning features.",
    "I couldn't find an answer to that. Would you like to ask about time zones, scheduling, or your language progress?",
    "I'm still learning! For now, I can best help with questions about scheduling, time zones, and language settings.",
];

/// One FAQ record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotEntry {
    pub question: String,
    pub answer: String,
    /// Ordered match phrases. Must not be empty for the entry to ever score.
    pub keywords: Vec<String>,
}

impl ChatbotEntry {
    pub fn new(question: &str, answer: &str, keywords: &[&str]) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// # Default Catalog (`default_entries`)
///
/// Builds the eight built-in FAQ records in their canonical order. Order
/// matters: ties in the keyword pass go to the earlier entry.
pub fn default_entries() -> Vec<ChatbotEntry> {
    vec![
        ChatbotEntry::new(
            "How do I change my time zone?",
            "You can change your time zone by going to Settings > Preferences > Time Zone. Select your current time zone from the dropdown menu and save your changes.",
            &["time zone", "timezone", "change timezone", "update timezone"],
        ),
        ChatbotEntry::new(
            "How do I schedule a new session?",
            "You can schedule a new session by clicking the 'New Session' button on your dashboard or by going to the Schedule page and clicking 'Schedule New Session'. Fill in the session details including title, language, date, and time.",
            &["schedule", "new session", "create session", "book session"],
        ),
        ChatbotEntry::new(
            "How do I cancel a session?",
            "To cancel a session, go to your Schedule page, find the session you want to cancel, and click the 'Cancel' button. You'll need to confirm your cancellation. Note that some cancellations may be subject to our cancellation policy.",
            &["cancel", "cancel session", "delete session", "remove session"],
        ),
        ChatbotEntry::new(
            "How do I change my language preferences?",
            "You can update your language preferences by going to the Languages page. There you can add new languages you want to learn, update your proficiency level, or remove languages you're no longer interested in.",
            &["language", "language preference", "update language", "add language"],
        ),
        ChatbotEntry::new(
            "What happens if I miss a session?",
            "If you miss a scheduled session, it will be marked as 'Missed' in your session history. You can reschedule the session by finding it in your Schedule page and clicking 'Reschedule'. Frequent missed sessions may affect your account status.",
            &["miss", "missed session", "didn't attend", "absent"],
        ),
        ChatbotEntry::new(
            "How does the time zone converter work?",
            "Our time zone converter automatically converts times between your time zone and your language partner's time zone. Just select both time zones and enter a time in your local time zone, and the converter will show you what time that will be for your partner.",
            &["converter", "time converter", "time zone converter", "convert time"],
        ),
        ChatbotEntry::new(
            "How do I update my profile?",
            "You can update your profile information by going to the Profile page. There you can change your name, email, profile picture, and other personal information. Don't forget to click 'Save Changes' after making your updates.",
            &["profile", "update profile", "edit profile", "change profile"],
        ),
        ChatbotEntry::new(
            "Can I get notifications for upcoming sessions?",
            "Yes! We send automatic notifications for upcoming sessions. You'll receive reminders 24 hours before and 15 minutes before each session. You can customize your notification preferences in the Settings page.",
            &["notification", "reminder", "alert", "upcoming session"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_shape() {
        let entries = default_entries();
        assert_eq!(entries.len(), 8);
        assert!(entries.iter().all(|e| !e.keywords.is_empty()));
        assert_eq!(entries[0].question, "How do I change my time zone?");
        assert_eq!(entries[7].keywords[3], "upcoming session");
    }

    #[test]
    fn test_entry_serializes_with_keywords() {
        let entry = ChatbotEntry::new("Q?", "A.", &["a", "b"]);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["keywords"], serde_json::json!(["a", "b"]));
    }
}

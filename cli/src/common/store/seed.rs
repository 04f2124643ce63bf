//! # Demo Data (`common::store::seed`)
//!
//! File: cli/src/common/store/seed.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Builds a [`Store`] pre-loaded with one user, three languages, three
//! sessions and the default FAQ. Session times are placed on "today" and
//! "tomorrow" as seen in the demo user's own zone.
//!
use super::models::{ChatbotQuestion, Language, Session, SessionStatus, User};
use super::{MemoryRepository, RecordId, Store};
use crate::common::chatbot::catalog::default_entries;
use crate::common::timezone::{convert, TimeZoneError};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use std::sync::Arc;
use tracing::info;

/// Id of the seeded demo user.
pub const DEMO_USER_ID: RecordId = 1;
/// Zone of the seeded demo user.
pub const DEMO_USER_ZONE: &str = "America/Los_Angeles";

pub fn demo_user(now: DateTime<Utc>) -> User {
    User {
        id: DEMO_USER_ID,
        username: "user1".into(),
        name: "Alex Johnson".into(),
        email: "alex@example.com".into(),
        time_zone: DEMO_USER_ZONE.into(),
        avatar: Some(String::new()),
        plan: Some("Premium Plan".into()),
        created_at: now,
    }
}

pub fn demo_languages() -> Vec<Language> {
    [
        (1, "Spanish", "es", "intermediate", 65),
        (2, "French", "fr", "beginner", 25),
        (3, "Japanese", "ja", "beginner", 10),
    ]
    .into_iter()
    .map(|(id, name, code, level, progress)| Language {
        id,
        name: name.into(),
        code: code.into(),
        level: level.into(),
        progress,
        user_id: DEMO_USER_ID,
    })
    .collect()
}

struct SessionSeed {
    id: RecordId,
    title: &'static str,
    description: &'static str,
    day_offset: i64,
    start: (u32, u32),
    end: (u32, u32),
    partner_id: RecordId,
    partner_name: &'static str,
    partner_zone: &'static str,
}

const SESSION_SEEDS: [SessionSeed; 3] = [
    SessionSeed {
        id: 1,
        title: "Spanish Conversation Practice",
        description: "Practice everyday conversational Spanish",
        day_offset: 0,
        start: (15, 0),
        end: (16, 0),
        partner_id: 2,
        partner_name: "Maria Rodriguez",
        partner_zone: "Europe/Madrid",
    },
    SessionSeed {
        id: 2,
        title: "French Grammar Review",
        description: "Review past tense and common expressions",
        day_offset: 0,
        start: (17, 30),
        end: (18, 30),
        partner_id: 3,
        partner_name: "Pierre Dubois",
        partner_zone: "Europe/Paris",
    },
    SessionSeed {
        id: 3,
        title: "Japanese Beginner Class",
        description: "Learn basic greetings and introductions",
        day_offset: 1,
        start: (9, 0),
        end: (10, 0),
        partner_id: 4,
        partner_name: "Yuki Tanaka",
        partner_zone: "Asia/Tokyo",
    },
];

fn at(day: NaiveDate, (hour, minute): (u32, u32)) -> Result<DateTime<Utc>, TimeZoneError> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| TimeZoneError::InvalidClock(format!("{:02}:{:02}", hour, minute)))?;
    convert::to_instant(day.and_time(time), DEMO_USER_ZONE)
}

/// The three demo sessions, anchored to the demo user's calendar day at `now`.
pub fn demo_sessions(now: DateTime<Utc>) -> Result<Vec<Session>, TimeZoneError> {
    let zone = convert::resolve_zone(DEMO_USER_ZONE)?;
    let today = now.with_timezone(&zone).date_naive();

    SESSION_SEEDS
        .iter()
        .map(|seed| {
            let day = today + TimeDelta::days(seed.day_offset);
            Ok(Session {
                id: seed.id,
                title: seed.title.into(),
                description: Some(seed.description.into()),
                start_time: at(day, seed.start)?,
                end_time: at(day, seed.end)?,
                language_id: seed.id,
                user_id: DEMO_USER_ID,
                partner_id: Some(seed.partner_id),
                partner_name: Some(seed.partner_name.into()),
                partner_time_zone: Some(seed.partner_zone.into()),
                status: SessionStatus::Scheduled,
            })
        })
        .collect()
}

/// The default FAQ numbered from 1.
pub fn demo_questions() -> Vec<ChatbotQuestion> {
    default_entries()
        .into_iter()
        .zip(1..)
        .map(|(entry, id)| ChatbotQuestion { id, entry })
        .collect()
}

/// # Seeded Store (`seeded_store`)
///
/// A store holding the demo data. Notifications start empty.
pub fn seeded_store(now: DateTime<Utc>) -> Result<Store, TimeZoneError> {
    let sessions = demo_sessions(now)?;
    info!(
        "Seeding store: 1 user, {} languages, {} sessions",
        demo_languages().len(),
        sessions.len()
    );
    Ok(Store {
        users: Arc::new(MemoryRepository::seeded("users", [demo_user(now)])),
        languages: Arc::new(MemoryRepository::seeded("languages", demo_languages())),
        sessions: Arc::new(MemoryRepository::seeded("sessions", sessions)),
        chatbot: Arc::new(MemoryRepository::seeded("chatbot", demo_questions())),
        notifications: Arc::new(MemoryRepository::new("notifications")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::store::Repository;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_sessions_use_demo_user_calendar() {
        // 2024-06-02 03:00 UTC is still 1 June in Los Angeles.
        let sessions = demo_sessions(utc("2024-06-02T03:00:00Z")).unwrap();
        assert_eq!(sessions[0].start_time, utc("2024-06-01T22:00:00Z"));
        assert_eq!(sessions[1].end_time, utc("2024-06-02T01:30:00Z"));
        assert_eq!(sessions[2].start_time, utc("2024-06-02T16:00:00Z"));
        assert!(sessions.iter().all(|s| s.end_time > s.start_time));
    }

    #[test]
    fn test_seeded_store_contents() {
        let store = seeded_store(utc("2024-06-01T12:00:00Z")).unwrap();
        assert_eq!(store.users.get(DEMO_USER_ID).unwrap().unwrap().name, "Alex Johnson");
        assert_eq!(store.languages.list().unwrap().len(), 3);
        assert_eq!(store.chatbot.list().unwrap().len(), 8);
        assert!(store.notifications.list().unwrap().is_empty());

        // New records continue after the seeded ids.
        let language = store
            .languages
            .create(Language {
                id: 0,
                name: "German".into(),
                code: "de".into(),
                level: "beginner".into(),
                progress: 0,
                user_id: DEMO_USER_ID,
            })
            .unwrap();
        assert_eq!(language.id, 4);
    }
}

//! # REST Records (`common::store::models`)
//!
//! File: cli/src/common/store/models.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The records served by the REST API, the payloads used to create and patch
//! them, and their validation rules. All JSON is camelCase.
//!
//! ## Architecture
//!
//! Each record type comes with:
//! - a `New*` payload that becomes a record via `into_record`
//! - a `*Patch` payload whose `apply` overwrites only the fields it carries
//! - a [`Validate`] impl listing every problem at once as [`FieldError`]s
//!
//! Session times are stored as absolute UTC instants. A [`ScheduleSessionRequest`]
//! carries wall-clock readings and is resolved to instants with the converter.
//!
use super::{Record, RecordId};
use crate::common::chatbot::ChatbotEntry;
use crate::common::timezone::convert;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default zone for users created without one.
pub const DEFAULT_USER_ZONE: &str = "UTC";
/// Default plan for users created without one.
pub const DEFAULT_PLAN: &str = "Free";
/// Default proficiency for new languages. Levels are stored lowercase.
pub const DEFAULT_LEVEL: &str = "beginner";
/// Minimum length of a session title.
pub const MIN_TITLE_LEN: usize = 3;

/// One problem with one field of a request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Payloads that can check themselves before touching a repository.
pub trait Validate {
    /// Every problem found; empty when the payload is acceptable.
    fn validate(&self) -> Vec<FieldError>;
}

fn require_text(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "must not be empty"));
    }
}

fn require_zone(errors: &mut Vec<FieldError>, field: &str, zone: &str) {
    if let Err(e) = convert::resolve_zone(zone) {
        errors.push(FieldError::new(field, e.to_string()));
    }
}

fn require_email(errors: &mut Vec<FieldError>, email: &str) {
    if !email.contains('@') {
        errors.push(FieldError::new("email", "must be an email address"));
    }
}

fn require_progress(errors: &mut Vec<FieldError>, progress: u8) {
    if progress > 100 {
        errors.push(FieldError::new("progress", "must be between 0 and 100"));
    }
}

fn require_title(errors: &mut Vec<FieldError>, title: &str) {
    if title.chars().count() < MIN_TITLE_LEN {
        errors.push(FieldError::new(
            "title",
            format!("must be at least {} characters", MIN_TITLE_LEN),
        ));
    }
}

// --- Users ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub name: String,
    pub email: String,
    pub time_zone: String,
    pub avatar: Option<String>,
    pub plan: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub email: String,
    pub time_zone: Option<String>,
    pub avatar: Option<String>,
    pub plan: Option<String>,
}

impl NewUser {
    pub fn into_record(self, now: DateTime<Utc>) -> User {
        User {
            id: 0,
            username: self.username,
            name: self.name,
            email: self.email,
            time_zone: self
                .time_zone
                .unwrap_or_else(|| DEFAULT_USER_ZONE.to_string()),
            avatar: self.avatar,
            plan: Some(self.plan.unwrap_or_else(|| DEFAULT_PLAN.to_string())),
            created_at: now,
        }
    }
}

impl Validate for NewUser {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_text(&mut errors, "username", &self.username);
        require_text(&mut errors, "name", &self.name);
        require_email(&mut errors, &self.email);
        if let Some(zone) = &self.time_zone {
            require_zone(&mut errors, "timeZone", zone);
        }
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub time_zone: Option<String>,
    pub avatar: Option<String>,
    pub plan: Option<String>,
}

impl UserPatch {
    pub fn apply(self, mut user: User) -> User {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(zone) = self.time_zone {
            user.time_zone = zone;
        }
        if self.avatar.is_some() {
            user.avatar = self.avatar;
        }
        if self.plan.is_some() {
            user.plan = self.plan;
        }
        user
    }
}

impl Validate for UserPatch {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(username) = &self.username {
            require_text(&mut errors, "username", username);
        }
        if let Some(name) = &self.name {
            require_text(&mut errors, "name", name);
        }
        if let Some(email) = &self.email {
            require_email(&mut errors, email);
        }
        if let Some(zone) = &self.time_zone {
            require_zone(&mut errors, "timeZone", zone);
        }
        errors
    }
}

/// Dashboard counters for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub upcoming_sessions: usize,
    pub active_languages: usize,
    pub hours_practiced: f64,
}

impl UserStats {
    /// Counts scheduled sessions and languages owned by `user_id`, and sums
    /// the length of its completed sessions in hours (one decimal place).
    pub fn compute(user_id: RecordId, sessions: &[Session], languages: &[Language]) -> Self {
        let owned = sessions.iter().filter(|s| s.user_id == user_id);
        let upcoming_sessions = owned
            .clone()
            .filter(|s| s.status == SessionStatus::Scheduled)
            .count();
        let minutes: i64 = owned
            .filter(|s| s.status == SessionStatus::Completed)
            .map(|s| (s.end_time - s.start_time).num_minutes().max(0))
            .sum();
        Self {
            upcoming_sessions,
            active_languages: languages.iter().filter(|l| l.user_id == user_id).count(),
            hours_practiced: (minutes as f64 / 6.0).round() / 10.0,
        }
    }
}

// --- Languages ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: RecordId,
    pub name: String,
    pub code: String,
    pub level: String,
    pub progress: u8,
    pub user_id: RecordId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLanguage {
    pub name: String,
    pub code: String,
    pub level: Option<String>,
    #[serde(default)]
    pub progress: u8,
    /// Owner; the current user when omitted.
    pub user_id: Option<RecordId>,
}

impl NewLanguage {
    pub fn into_record(self, current_user: RecordId) -> Language {
        Language {
            id: 0,
            name: self.name,
            code: self.code,
            level: self
                .level
                .map(|level| level.trim().to_lowercase())
                .unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
            progress: self.progress,
            user_id: self.user_id.unwrap_or(current_user),
        }
    }
}

impl Validate for NewLanguage {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_text(&mut errors, "name", &self.name);
        require_text(&mut errors, "code", &self.code);
        require_progress(&mut errors, self.progress);
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub level: Option<String>,
    pub progress: Option<u8>,
}

impl LanguagePatch {
    pub fn apply(self, mut language: Language) -> Language {
        if let Some(name) = self.name {
            language.name = name;
        }
        if let Some(code) = self.code {
            language.code = code;
        }
        if let Some(level) = self.level {
            language.level = level.trim().to_lowercase();
        }
        if let Some(progress) = self.progress {
            language.progress = progress;
        }
        language
    }
}

impl Validate for LanguagePatch {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            require_text(&mut errors, "name", name);
        }
        if let Some(code) = &self.code {
            require_text(&mut errors, "code", code);
        }
        if let Some(progress) = self.progress {
            require_progress(&mut errors, progress);
        }
        errors
    }
}

// --- Sessions ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
    Missed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: RecordId,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub language_id: RecordId,
    pub user_id: RecordId,
    pub partner_id: Option<RecordId>,
    pub partner_name: Option<String>,
    pub partner_time_zone: Option<String>,
    pub status: SessionStatus,
}

/// # Schedule Session Payload (`ScheduleSessionRequest`)
///
/// Wall-clock session times as entered by the user. `date`, `start_time`
/// and `end_time` are read in `user_time_zone`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSessionRequest {
    pub title: String,
    pub description: Option<String>,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub language_id: RecordId,
    pub user_time_zone: String,
    pub partner_time_zone: Option<String>,
    pub partner_id: Option<RecordId>,
    pub partner_name: Option<String>,
}

impl ScheduleSessionRequest {
    /// Validates the payload and converts its wall-clock times to instants.
    ///
    /// ## Returns
    ///
    /// * `Ok((start, end))` - Absolute UTC instants with `end > start`.
    /// * `Err(errors)` - Every field problem found.
    pub fn resolve_times(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), Vec<FieldError>> {
        let mut errors = Vec::new();
        require_title(&mut errors, &self.title);
        if let Some(zone) = &self.partner_time_zone {
            require_zone(&mut errors, "partnerTimeZone", zone);
        }

        let date = convert::parse_date(&self.date)
            .map_err(|e| errors.push(FieldError::new("date", e.to_string())))
            .ok();
        let start = convert::parse_clock(&self.start_time)
            .map_err(|e| errors.push(FieldError::new("startTime", e.to_string())))
            .ok();
        let end = convert::parse_clock(&self.end_time)
            .map_err(|e| errors.push(FieldError::new("endTime", e.to_string())))
            .ok();
        let zone_ok = match convert::resolve_zone(&self.user_time_zone) {
            Ok(_) => true,
            Err(e) => {
                errors.push(FieldError::new("userTimeZone", e.to_string()));
                false
            }
        };

        let (Some(date), Some(start), Some(end), true) = (date, start, end, zone_ok) else {
            return Err(errors);
        };

        let instants = convert::to_instant(date.and_time(start), &self.user_time_zone)
            .and_then(|s| Ok((s, convert::to_instant(date.and_time(end), &self.user_time_zone)?)));
        match instants {
            Ok((start, end)) if end > start && errors.is_empty() => Ok((start, end)),
            Ok((start, end)) => {
                if end <= start {
                    errors.push(FieldError::new("endTime", "must be after startTime"));
                }
                Err(errors)
            }
            Err(e) => {
                errors.push(FieldError::new("startTime", e.to_string()));
                Err(errors)
            }
        }
    }

    /// A scheduled session owned by `user_id` spanning `start..end`.
    pub fn into_record(
        self,
        user_id: RecordId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Session {
        Session {
            id: 0,
            title: self.title,
            description: Some(self.description.unwrap_or_default()),
            start_time: start,
            end_time: end,
            language_id: self.language_id,
            user_id,
            partner_id: self.partner_id,
            partner_name: self.partner_name,
            partner_time_zone: self.partner_time_zone,
            status: SessionStatus::Scheduled,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub language_id: Option<RecordId>,
    pub partner_id: Option<RecordId>,
    pub partner_name: Option<String>,
    pub partner_time_zone: Option<String>,
    pub status: Option<SessionStatus>,
}

impl SessionPatch {
    /// Applies the patch, rejecting results that end before they start.
    pub fn apply(self, mut session: Session) -> Result<Session, Vec<FieldError>> {
        if let Some(title) = self.title {
            session.title = title;
        }
        if self.description.is_some() {
            session.description = self.description;
        }
        if let Some(start) = self.start_time {
            session.start_time = start;
        }
        if let Some(end) = self.end_time {
            session.end_time = end;
        }
        if let Some(language_id) = self.language_id {
            session.language_id = language_id;
        }
        if self.partner_id.is_some() {
            session.partner_id = self.partner_id;
        }
        if self.partner_name.is_some() {
            session.partner_name = self.partner_name;
        }
        if self.partner_time_zone.is_some() {
            session.partner_time_zone = self.partner_time_zone;
        }
        if let Some(status) = self.status {
            session.status = status;
        }

        if session.end_time <= session.start_time {
            return Err(vec![FieldError::new("endTime", "must be after startTime")]);
        }
        Ok(session)
    }
}

impl Validate for SessionPatch {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            require_title(&mut errors, title);
        }
        if let Some(zone) = &self.partner_time_zone {
            require_zone(&mut errors, "partnerTimeZone", zone);
        }
        errors
    }
}

// --- Chatbot questions ---

/// A stored FAQ entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotQuestion {
    pub id: RecordId,
    #[serde(flatten)]
    pub entry: ChatbotEntry,
}

impl Validate for ChatbotEntry {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_text(&mut errors, "question", &self.question);
        require_text(&mut errors, "answer", &self.answer);
        if self.keywords.iter().all(|k| k.trim().is_empty()) {
            errors.push(FieldError::new("keywords", "must contain at least one keyword"));
        }
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatbotQuestionPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl ChatbotQuestionPatch {
    pub fn apply(self, mut question: ChatbotQuestion) -> ChatbotQuestion {
        if let Some(text) = self.question {
            question.entry.question = text;
        }
        if let Some(answer) = self.answer {
            question.entry.answer = answer;
        }
        if let Some(keywords) = self.keywords {
            question.entry.keywords = keywords;
        }
        question
    }
}

impl Validate for ChatbotQuestionPatch {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(text) = &self.question {
            require_text(&mut errors, "question", text);
        }
        if let Some(answer) = &self.answer {
            require_text(&mut errors, "answer", answer);
        }
        if let Some(keywords) = &self.keywords {
            if keywords.iter().all(|k| k.trim().is_empty()) {
                errors.push(FieldError::new("keywords", "must contain at least one keyword"));
            }
        }
        errors
    }
}

/// Body of `POST /api/chatbot/query`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatbotQuery {
    pub query: String,
}

// --- Notifications ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: RecordId,
    pub user_id: RecordId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    /// Recipient; the current user when omitted.
    pub user_id: Option<RecordId>,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl NewNotification {
    pub fn into_record(self, current_user: RecordId, now: DateTime<Utc>) -> Notification {
        Notification {
            id: 0,
            user_id: self.user_id.unwrap_or(current_user),
            title: self.title,
            message: self.message,
            kind: self.kind,
            read: false,
            created_at: now,
        }
    }
}

impl Validate for NewNotification {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_text(&mut errors, "title", &self.title);
        require_text(&mut errors, "message", &self.message);
        require_text(&mut errors, "type", &self.kind);
        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationPatch {
    pub title: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub read: Option<bool>,
}

impl NotificationPatch {
    pub fn apply(self, mut notification: Notification) -> Notification {
        if let Some(title) = self.title {
            notification.title = title;
        }
        if let Some(message) = self.message {
            notification.message = message;
        }
        if let Some(kind) = self.kind {
            notification.kind = kind;
        }
        if let Some(read) = self.read {
            notification.read = read;
        }
        notification
    }
}

impl Validate for NotificationPatch {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            require_text(&mut errors, "title", title);
        }
        if let Some(message) = &self.message {
            require_text(&mut errors, "message", message);
        }
        if let Some(kind) = &self.kind {
            require_text(&mut errors, "type", kind);
        }
        errors
    }
}

// --- Record impls ---

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> RecordId {
                    self.id
                }

                fn with_id(self, id: RecordId) -> Self {
                    Self { id, ..self }
                }
            }
        )*
    };
}

impl_record!(User, Language, Session, ChatbotQuestion, Notification);

//! # TzTalk Record Store (`common::store`)
//!
//! File: cli/src/common/store/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The data layer behind the REST service: users, languages, sessions,
//! chatbot questions and notifications. Every collection sits behind the
//! [`Repository`] trait so handlers never depend on a concrete backend.
//!
//! ## Architecture
//!
//! - **`models`**: The serializable records, their create/patch payloads and validation.
//! - **`repository`**: `MemoryRepository<T>`, a `RwLock`-guarded map and the only backend.
//! - **`seed`**: The demo user, languages, sessions and FAQ loaded at startup.
//!
//! A [`Store`] bundles one repository per record type behind `Arc<dyn Repository<_>>`
//! and is cheap to clone into request handlers.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::store::{Store, models::Language};
//!
//! let store = Store::in_memory();
//! let created = store.languages.create(language)?; // id assigned by the repository
//! let found = store.languages.get(created.id)?;
//! ```
//!
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Record payloads and validation.
pub mod models;
/// In-memory repository backend.
pub mod repository;
/// Demo data.
pub mod seed;

pub use repository::MemoryRepository;

use models::{ChatbotQuestion, Language, Notification, Session, User};

/// Positive integer identifier assigned by a repository.
pub type RecordId = u32;

/// Errors raised by repository backends.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("The {0} repository lock is poisoned")]
    Poisoned(&'static str),

    #[error("The {0} repository has run out of ids")]
    IdsExhausted(&'static str),
}

/// A value that can live in a repository.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> RecordId;

    /// Returns the record with its id replaced.
    fn with_id(self, id: RecordId) -> Self;
}

/// # Repository Interface (`Repository`)
///
/// CRUD over one record type. Implementations assign ids on `create` and
/// keep `list` ordered by id.
pub trait Repository<T: Record>: Send + Sync {
    fn list(&self) -> Result<Vec<T>, StoreError>;

    fn get(&self, id: RecordId) -> Result<Option<T>, StoreError>;

    /// Stores `record` under a fresh id and returns the stored copy. The
    /// incoming id is ignored.
    fn create(&self, record: T) -> Result<T, StoreError>;

    /// Replaces the record at `id`. Returns `None` when nothing was there.
    fn update(&self, id: RecordId, record: T) -> Result<Option<T>, StoreError>;

    /// Removes the record at `id`. Returns `false` when nothing was there.
    fn delete(&self, id: RecordId) -> Result<bool, StoreError>;

    /// Records for which `keep` returns `true`, in id order.
    fn list_by(&self, keep: &dyn Fn(&T) -> bool) -> Result<Vec<T>, StoreError> {
        Ok(self.list()?.into_iter().filter(|record| keep(record)).collect())
    }
}

/// One repository per record type, shared by every request handler.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn Repository<User>>,
    pub languages: Arc<dyn Repository<Language>>,
    pub sessions: Arc<dyn Repository<Session>>,
    pub chatbot: Arc<dyn Repository<ChatbotQuestion>>,
    pub notifications: Arc<dyn Repository<Notification>>,
}

impl Store {
    /// A store with every collection empty.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryRepository::<User>::new("users")),
            languages: Arc::new(MemoryRepository::<Language>::new("languages")),
            sessions: Arc::new(MemoryRepository::<Session>::new("sessions")),
            chatbot: Arc::new(MemoryRepository::<ChatbotQuestion>::new("chatbot")),
            notifications: Arc::new(MemoryRepository::<Notification>::new("notifications")),
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

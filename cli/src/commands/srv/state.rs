//! Shared application state injected into every Axum handler.

use std::fmt;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::ServerConfig;
use crate::common::chatbot::matcher::{FallbackPicker, RandomPicker};
use crate::common::store::{RecordId, Store};

/// Fallback picker shared by concurrent chatbot queries.
pub type SharedPicker = Arc<Mutex<Box<dyn FallbackPicker + Send>>>;

/// State shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Effective server configuration.
    pub config: Arc<ServerConfig>,
    /// Repositories for every record type.
    pub store: Store,
    /// Chooses fallback replies for unmatched chatbot queries.
    pub picker: SharedPicker,
}

impl AppState {
    /// Builds the state with a picker seeded from `config.chatbot_seed`,
    /// or from OS entropy when no seed is set.
    pub fn new(config: ServerConfig, store: Store) -> Self {
        let rng = match config.chatbot_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_picker(config, store, RandomPicker::new(rng))
    }

    pub fn with_picker(
        config: ServerConfig,
        store: Store,
        picker: impl FallbackPicker + Send + 'static,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            picker: Arc::new(Mutex::new(Box::new(picker))),
        }
    }

    /// The user that "current user" routes act on.
    pub fn current_user(&self) -> RecordId {
        self.config.current_user_id
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

//! # TzTalk FAQ Chatbot (`common::chatbot`)
//!
//! File: cli/src/common/chatbot/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A keyword-matching FAQ responder. Given free text and a list of
//! question/answer/keyword records, it picks the best-matching answer or falls
//! back to one of a handful of canned replies.
//!
//! ## Architecture
//!
//! - **`catalog`**: `ChatbotEntry`, the default 8-entry FAQ, fallback replies and the welcome line.
//! - **`matcher`**: Scoring, best-match selection and the injectable `FallbackPicker`.
//! - **`transcript`**: The append-only message log used by the interactive REPL.
//!
//! The matcher never mutates the catalog and has no error path.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::chatbot::{catalog, matcher};
//!
//! let entries = catalog::default_entries();
//! let mut picker = matcher::RandomPicker::thread_local();
//! let answer = matcher::respond("How do I cancel a session?", &entries, &mut picker);
//! ```
//!

/// FAQ records and canned replies.
pub mod catalog;
/// Keyword scoring and fallback selection.
pub mod matcher;
/// Append-only chat transcript.
pub mod transcript;

pub use catalog::ChatbotEntry;

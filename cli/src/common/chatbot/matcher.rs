//! # Keyword Matcher (`common::chatbot::matcher`)
//!
//! File: cli/src/common/chatbot/matcher.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Picks the catalog answer that best fits a free-text question.
//!
//! ## Architecture
//!
//! Matching runs in two passes over a lowercased copy of the input:
//! 1. **Exact pass**: an input equal to a (lowercased) question wins outright.
//! 2. **Keyword pass**: every keyword found as a substring adds its character
//!    count to the entry's score. The strictly highest score wins, so ties go
//!    to the earlier entry. Scores at or below [`MATCH_THRESHOLD`] are rejected.
//!
//! When both passes fail, a [`FallbackPicker`] chooses one of the canned
//! replies. Production code uses [`RandomPicker`]; tests supply a fixed picker.
//!
use super::catalog::{ChatbotEntry, FALLBACK_RESPONSES};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// A keyword-pass score must be strictly greater than this to count as a match.
pub const MATCH_THRESHOLD: usize = 3;

/// Chooses an index into the fallback replies.
pub trait FallbackPicker {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform fallback selection backed by any `rand::Rng`.
#[derive(Debug)]
pub struct RandomPicker<R> {
    rng: R,
}

impl<R: Rng> RandomPicker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPicker<StdRng> {
    /// Reproducible picker, used by `chat ask --seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl RandomPicker<ThreadRng> {
    pub fn thread_local() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> FallbackPicker for RandomPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

impl<P: FallbackPicker + ?Sized> FallbackPicker for Box<P> {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

/// Keyword-pass score of `entry` against an already lowercased input.
pub fn score(lowered_input: &str, entry: &ChatbotEntry) -> usize {
    entry
        .keywords
        .iter()
        .filter(|keyword| lowered_input.contains(keyword.to_lowercase().as_str()))
        .map(|keyword| keyword.chars().count())
        .sum()
}

/// # Find Best Match (`find_best_match`)
///
/// Runs the exact pass and then the keyword pass over `entries`.
///
/// ## Arguments
///
/// * `input` - Raw user text. It is lowercased but not trimmed.
/// * `entries` - The catalog, in priority order.
///
/// ## Returns
///
/// * `Option<&ChatbotEntry>` - The winning entry, or `None` when nothing
///   clears [`MATCH_THRESHOLD`].
pub fn find_best_match<'a, I>(input: &str, entries: I) -> Option<&'a ChatbotEntry>
where
    I: IntoIterator<Item = &'a ChatbotEntry>,
    I::IntoIter: Clone,
{
    let lowered = input.to_lowercase();
    let entries = entries.into_iter();

    if let Some(exact) = entries
        .clone()
        .find(|entry| entry.question.to_lowercase() == lowered)
    {
        trace!("Exact question match: {}", exact.question);
        return Some(exact);
    }

    let mut best: Option<&ChatbotEntry> = None;
    let mut highest = 0;
    for entry in entries {
        let entry_score = score(&lowered, entry);
        if entry_score > highest {
            highest = entry_score;
            best = Some(entry);
        }
    }

    debug!("Best keyword score for {:?}: {}", input, highest);
    if highest > MATCH_THRESHOLD {
        best
    } else {
        None
    }
}

/// A fallback reply chosen by `picker`.
pub fn fallback_response(picker: &mut impl FallbackPicker) -> &'static str {
    let index = picker.pick(FALLBACK_RESPONSES.len());
    FALLBACK_RESPONSES[index % FALLBACK_RESPONSES.len()]
}

/// # Respond to Input (`respond`)
///
/// The matcher's single entry point: the best entry's answer, or a fallback.
/// Never fails; empty input simply falls through to the fallback.
pub fn respond(input: &str, entries: &[ChatbotEntry], picker: &mut impl FallbackPicker) -> String {
    match find_best_match(input, entries) {
        Some(entry) => entry.answer.clone(),
        None => fallback_response(picker).to_string(),
    }
}

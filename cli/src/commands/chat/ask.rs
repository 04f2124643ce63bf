//! # TzTalk Chat Ask Command
//!
//! File: cli/src/commands/chat/ask.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `tztalk chat ask`: answers one question and exits. All words
//! after `ask` are joined with single spaces into the question text.
//!
use super::picker_for;
use crate::common::chatbot::{catalog, matcher};
use crate::core::error::Result;
use clap::Parser;
use tracing::debug;

/// # Ask Arguments (`AskArgs`)
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question text.
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// Seed for fallback selection, for reproducible replies.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// # Handle Ask Command (`handle_ask`)
pub async fn handle_ask(args: AskArgs) -> Result<()> {
    let question = args.question.join(" ");
    debug!("Answering {:?}", question);

    let entries = catalog::default_entries();
    let mut picker = picker_for(args.seed);
    println!("{}", matcher::respond(&question, &entries, &mut picker));
    Ok(())
}

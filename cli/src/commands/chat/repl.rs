//! # TzTalk Chat REPL
//!
//! File: cli/src/commands/chat/repl.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `tztalk chat repl`, a read-eval-print loop around the FAQ
//! matcher. Every exchange is recorded in a [`Transcript`] that opens with
//! the bot's welcome message.
//!
//! ## Architecture
//!
//! `run_repl` is generic over its input and output streams so the loop can be
//! driven from tests. The loop ends on `bye` (any case) or end of input.
//! Blank lines are ignored.
//!
//! ```text
//! Bot: 👋 Hi there! I'm your language learning assistant. How can I help you today?
//! Type 'bye' to quit.
//! You: how do I cancel?
//! Bot: To cancel a session, go to your Schedule page, ...
//! You: bye
//! Bot: Goodbye!
//! ```
//!
use super::picker_for;
use crate::common::chatbot::matcher::{self, FallbackPicker};
use crate::common::chatbot::transcript::{Sender, Transcript};
use crate::common::chatbot::{catalog, ChatbotEntry};
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// # REPL Arguments (`ReplArgs`)
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Seed for fallback selection, for reproducible replies.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// # Handle REPL Command (`handle_repl`)
///
/// Runs the loop on stdin/stdout with the built-in catalog.
pub async fn handle_repl(args: ReplArgs) -> Result<()> {
    let entries = catalog::default_entries();
    let mut picker = picker_for(args.seed);
    let stdin = io::stdin();
    let transcript = run_repl(stdin.lock(), io::stdout(), &entries, &mut picker)?;
    info!("Chat ended after {} messages", transcript.len());
    Ok(())
}

/// # Run REPL (`run_repl`)
///
/// Reads questions line by line from `input` and writes prompts and replies
/// to `output`.
///
/// ## Returns
///
/// * `Result<Transcript>`: The full conversation, or an I/O error from either stream.
pub fn run_repl<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    entries: &[ChatbotEntry],
    picker: &mut impl FallbackPicker,
) -> Result<Transcript> {
    let mut transcript = Transcript::with_welcome();
    writeln!(output, "Bot: {}", catalog::WELCOME_MESSAGE)?;
    writeln!(output, "Type 'bye' to quit.")?;

    loop {
        write!(output, "You: ")?;
        output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            // End of input behaves like 'bye' without the farewell.
            writeln!(output)?;
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("bye") {
            writeln!(output, "Bot: Goodbye!")?;
            break;
        }

        transcript.push(Sender::User, trimmed);
        let reply = matcher::respond(trimmed, entries, picker);
        debug!("Reply #{}: {}", transcript.len() + 1, reply);
        writeln!(output, "Bot: {}", reply)?;
        transcript.push(Sender::Bot, reply);
    }

    Ok(transcript)
}

//! # TzTalk Chat Command Group
//!
//! File: cli/src/commands/chat/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module is the entry point and router for the `tztalk chat` command
//! group, which puts the FAQ chatbot on the terminal.
//!
//! ## Architecture
//!
//! - `ChatArgs` / `ChatCommand`: The command group and its subcommands.
//! - `handle_chat`: Dispatches to `ask`, `questions` or `repl`.
//!
//! All subcommands use the built-in FAQ catalog. `--seed` makes fallback
//! replies reproducible.
//!
//! ## Examples
//!
//! ```bash
//! tztalk chat ask How do I cancel a session?
//! tztalk chat questions
//! tztalk chat repl
//! ```
//!
use crate::common::chatbot::matcher::{FallbackPicker, RandomPicker};
use crate::core::error::Result;
use clap::{Parser, Subcommand};

/// Contains the handler and arguments for `tztalk chat ask`.
mod ask;
/// Contains the handler for `tztalk chat questions`.
mod questions;
/// Contains the interactive loop behind `tztalk chat repl`.
mod repl;

/// # Chat Command Group Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    #[command(subcommand)]
    command: ChatCommand,
}

/// # Chat Subcommands (`ChatCommand`)
#[derive(Subcommand, Debug)]
enum ChatCommand {
    /// Ask the FAQ bot a single question.
    Ask(ask::AskArgs),
    /// List the questions the bot knows.
    Questions(questions::QuestionsArgs),
    /// Chat with the bot interactively. Type 'bye' to quit.
    Repl(repl::ReplArgs),
}

/// # Handle Chat Command (`handle_chat`)
///
/// ## Arguments
///
/// * `args`: The parsed `ChatArgs` holding the chosen subcommand.
///
/// ## Returns
///
/// * `Result<()>`: Propagates the subcommand handler's result.
pub async fn handle_chat(args: ChatArgs) -> Result<()> {
    match args.command {
        ChatCommand::Ask(args) => ask::handle_ask(args).await?,
        ChatCommand::Questions(args) => questions::handle_questions(args).await?,
        ChatCommand::Repl(args) => repl::handle_repl(args).await?,
    }
    Ok(())
}

/// A seeded picker when `seed` is given, otherwise one backed by the thread RNG.
fn picker_for(seed: Option<u64>) -> Box<dyn FallbackPicker> {
    match seed {
        Some(seed) => Box::new(RandomPicker::seeded(seed)),
        None => Box::new(RandomPicker::thread_local()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_chat_ask_joins_words() {
        let result = ChatArgs::try_parse_from(["chat", "ask", "how", "do", "I", "cancel?"]);
        match result.unwrap().command {
            ChatCommand::Ask(args) => assert_eq!(args.question.join(" "), "how do I cancel?"),
            _ => panic!("Incorrect subcommand parsed for 'ask'"),
        }
    }

    #[test]
    fn test_parses_chat_ask_requires_text() {
        assert!(ChatArgs::try_parse_from(["chat", "ask"]).is_err());
    }

    #[test]
    fn test_parses_chat_repl_seed() {
        match ChatArgs::try_parse_from(["chat", "repl", "--seed", "9"]).unwrap().command {
            ChatCommand::Repl(args) => assert_eq!(args.seed, Some(9)),
            _ => panic!("Incorrect subcommand parsed for 'repl'"),
        }
    }

    #[test]
    fn test_boxed_picker_delegates() {
        let mut boxed = picker_for(Some(3));
        let mut direct = RandomPicker::seeded(3);
        assert_eq!(boxed.pick(5), direct.pick(5));
    }
}

//! # TzTalk Chat Questions Command
//!
//! File: cli/src/commands/chat/questions.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `tztalk chat questions`: lists the FAQ questions in catalog
//! order, optionally with their keywords.
//!
use crate::common::chatbot::{catalog, ChatbotEntry};
use crate::core::error::Result;
use clap::Parser;

/// # Questions Arguments (`QuestionsArgs`)
#[derive(Parser, Debug)]
pub struct QuestionsArgs {
    /// Show each question's match keywords.
    #[arg(long, short)]
    pub keywords: bool,
}

/// # Handle Questions Command (`handle_questions`)
pub async fn handle_questions(args: QuestionsArgs) -> Result<()> {
    for line in render_questions(&catalog::default_entries(), args.keywords) {
        println!("{}", line);
    }
    Ok(())
}

fn render_questions(entries: &[ChatbotEntry], with_keywords: bool) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if with_keywords {
                format!("{}. {} [{}]", i + 1, entry.question, entry.keywords.join(", "))
            } else {
                format!("{}. {}", i + 1, entry.question)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_questions_numbered() {
        let lines = render_questions(&catalog::default_entries(), false);
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[2], "3. How do I cancel a session?");
    }

    #[test]
    fn test_render_questions_with_keywords() {
        let entries = vec![ChatbotEntry::new("Q?", "A.", &["one", "two"])];
        assert_eq!(render_questions(&entries, true), vec!["1. Q? [one, two]"]);
    }
}

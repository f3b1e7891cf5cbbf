//! Interactive `watch` session.
//!
//! The event loop lives in [`quip::watch::Watch`]; this module parses input
//! lines into session commands and prints what happened. Ctrl-C ends the
//! session like `quit`.

use super::commands::{
    handle_add, handle_categories, handle_filter, handle_last, handle_list, handle_random,
    no_remote, AppContext, Engine,
};
use super::render::{print_categories, print_messages};
use colored::Colorize;
use quip::api::{CmdResult, MessageLevel};
use quip::error::Result;
use quip::watch::{Watch, WatchEvent};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum SessionCommand {
    Next,
    Filter(String),
    Categories,
    List,
    Add { text: String, category: String },
    Sync,
    Last,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parses one input line. An empty line means `next`.
    pub(super) fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "" | "next" | "n" => Ok(SessionCommand::Next),
            "filter" | "f" if rest.is_empty() => Err("usage: filter <category>".to_string()),
            "filter" | "f" => Ok(SessionCommand::Filter(rest.to_string())),
            "categories" | "cats" => Ok(SessionCommand::Categories),
            "list" | "ls" => Ok(SessionCommand::List),
            "add" | "a" => match rest.rsplit_once('|') {
                Some((text, category)) => Ok(SessionCommand::Add {
                    text: text.trim().to_string(),
                    category: category.trim().to_string(),
                }),
                None => Err("usage: add <text> | <category>".to_string()),
            },
            "sync" | "s" => Ok(SessionCommand::Sync),
            "last" => Ok(SessionCommand::Last),
            "help" | "h" | "?" => Ok(SessionCommand::Help),
            "quit" | "q" | "exit" => Ok(SessionCommand::Quit),
            other => Err(format!("Unknown command: {} (type `help`)", other)),
        }
    }
}

const SESSION_HELP: &str = "\
Commands:
  next, n (or Enter)         show another quote
  filter, f <category>       switch category (\"All\" for everything)
  categories, cats           list categories
  list, ls                   list quotes in the active category
  add, a <text> | <category> add a quote
  sync, s                    sync with the remote now
  last                       show the last quote again
  help, h                    this help
  quit, q                    leave";

pub(super) async fn run(ctx: &mut AppContext) -> Result<()> {
    let engine = ctx.remote_engine()?;
    if engine.is_none() {
        println!("{}", "No remote configured, sync is off.".dimmed());
    }
    let input = BufReader::new(tokio::io::stdin()).lines();
    let mut watch = Watch::new(engine, ctx.config.sync_interval(), input);

    println!("{}", "Type `help` for commands.".dimmed());
    report(handle_random(ctx));
    prompt();

    loop {
        let event = tokio::select! {
            event = watch.next_event(&mut ctx.api) => event?,
            _ = tokio::signal::ctrl_c() => break,
        };
        match event {
            WatchEvent::Line(line) => {
                match SessionCommand::parse(&line) {
                    Ok(SessionCommand::Quit) => break,
                    Ok(command) => report(execute(ctx, watch.engine_mut(), command).await),
                    Err(usage) => println!("{}", usage.yellow()),
                }
                prompt();
            }
            WatchEvent::Synced(result) => show_synced(ctx, result),
            WatchEvent::Closed => break,
        }
    }

    println!();
    Ok(())
}

/// Background syncs stay quiet unless something happened.
fn show_synced(ctx: &AppContext, result: CmdResult) {
    let notable: Vec<_> = result
        .messages
        .into_iter()
        .filter(|m| m.level != MessageLevel::Info)
        .collect();
    if !notable.is_empty() {
        println!();
        print_messages(&notable);
    }
    if result.changed {
        if let Ok(categories) = ctx.api.categories() {
            print_categories(&categories.categories);
        }
    }
    if !notable.is_empty() || result.changed {
        prompt();
    }
}

async fn execute(
    ctx: &mut AppContext,
    engine: Option<&mut Engine>,
    command: SessionCommand,
) -> Result<()> {
    match command {
        SessionCommand::Next => handle_random(ctx),
        SessionCommand::Filter(category) => handle_filter(ctx, &category),
        SessionCommand::Categories => handle_categories(ctx),
        SessionCommand::List => handle_list(ctx, None),
        SessionCommand::Add { text, category } => {
            handle_add(ctx, engine.as_deref(), &text, &category).await
        }
        SessionCommand::Sync => {
            let engine = engine.ok_or_else(no_remote)?;
            if engine.begin() {
                println!("{}", "Syncing...".dimmed());
            } else {
                println!("{}", "Sync already in progress".dimmed());
            }
            Ok(())
        }
        SessionCommand::Last => handle_last(ctx),
        SessionCommand::Help => {
            println!("{}", SESSION_HELP);
            Ok(())
        }
        SessionCommand::Quit => Ok(()),
    }
}

/// Errors inside the session are shown and the loop goes on.
fn report(outcome: Result<()>) {
    if let Err(e) = outcome {
        eprintln!("{} {}", "Error:".red(), e);
    }
}

fn prompt() {
    print!("{} ", ">".cyan());
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_is_next() {
        assert_eq!(SessionCommand::parse("").unwrap(), SessionCommand::Next);
        assert_eq!(SessionCommand::parse("  n ").unwrap(), SessionCommand::Next);
    }

    #[test]
    fn filter_keeps_multi_word_category() {
        assert_eq!(
            SessionCommand::parse("filter Deep Thoughts").unwrap(),
            SessionCommand::Filter("Deep Thoughts".to_string())
        );
        assert!(SessionCommand::parse("filter").is_err());
    }

    #[test]
    fn add_splits_on_last_pipe() {
        assert_eq!(
            SessionCommand::parse("add Either | or | Logic").unwrap(),
            SessionCommand::Add {
                text: "Either | or".to_string(),
                category: "Logic".to_string(),
            }
        );
        assert!(SessionCommand::parse("add no category").is_err());
    }

    #[test]
    fn add_passes_empty_fields_through_for_validation() {
        assert_eq!(
            SessionCommand::parse("add | Life").unwrap(),
            SessionCommand::Add {
                text: String::new(),
                category: "Life".to_string(),
            }
        );
    }

    #[test]
    fn quit_aliases() {
        for word in ["quit", "q", "exit"] {
            assert_eq!(SessionCommand::parse(word).unwrap(), SessionCommand::Quit);
        }
    }

    #[test]
    fn unknown_word_is_rejected() {
        let err = SessionCommand::parse("dance").unwrap_err();
        assert!(err.contains("dance"));
    }
}

//! # CLI Layer
//!
//! This module is **one possible UI client** for quip, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Uses `std::process::exit`
//! - Handles argument parsing
//! - Installs the log subscriber
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `setup`: clap definitions and grouped help
//! - `commands`: `run()` dispatch plus one `handle_*()` per command
//! - `session`: the interactive `watch` loop (stdin, sync timer, fetch completion)
//! - `render`: turns `CmdResult` pieces into colored terminal output

mod commands;
mod render;
mod session;
mod setup;

pub use commands::run;

//! # Quip Architecture
//!
//! Quip is a **UI-agnostic random quote library**: a categorized quote
//! collection, persisted locally, reconciled against an optional remote
//! endpoint, with a random pick from the active category. The `quip` binary is
//! one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders output, runs the watch session │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the repository           │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)   Sync Engine (sync/)        │
//! │  - Business logic over the       - Background fetch,        │
//! │    repository                      merge on the caller      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository (repository.rs) over Storage (store/)           │
//! │  - Quote list + active category, persisted on every change  │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust arguments and returns Rust types.
//! It never writes to stdout/stderr and never exits the process; diagnostics
//! go through `tracing` and are only visible when the binary installs a
//! subscriber (see [`logging`]).
//!
//! ## Data Flow
//!
//! Everything entering from outside (the store, an import file, a remote
//! payload) passes through [`schema`] before it becomes a [`model::Quote`].
//! Lists from different sources are reconciled by [`merge`]: keyed by
//! (text, category), newest `updatedAt` wins.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`repository`]: The single owner of the quote list and active category
//! - [`store`]: Storage abstraction and implementations
//! - [`sync`]: Remote source trait, HTTP remote, sync engine
//! - [`watch`]: Event loop of the interactive session
//! - [`schema`]: Shape validation of untrusted JSON
//! - [`merge`]: Timestamp-wins reconciliation
//! - [`selection`]: Uniform random pick
//! - [`model`]: Core data types (`Quote`, `CategoryFilter`, `Scope`)
//! - [`config`]: Configuration management
//! - [`init`]: Scope discovery and context setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod logging;
pub mod merge;
pub mod model;
pub mod repository;
pub mod schema;
pub mod selection;
pub mod store;
pub mod sync;
pub mod watch;

//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point for all quip operations, whichever client drives it (the one-shot CLI
//! commands or the interactive `watch` session).
//!
//! The facade:
//! - **Owns** the [`QuoteRepository`], so there is exactly one copy of the
//!   quote list and the active category per process
//! - **Dispatches** to the matching `commands::*` function
//! - **Returns structured types** (`Result<CmdResult>`), never strings
//!
//! It does no printing and no terminal I/O. Business rules live in the
//! command modules and the repository.
//!
//! ## Generic Over StorageBackend
//!
//! `QuipApi<B: StorageBackend>`:
//! - Production: `QuipApi<FsBackend>`
//! - Testing: `QuipApi<MemBackend>`
//!
//! Remote sync is not owned by the API. Callers hold a [`SyncEngine`] and hand
//! it in, because the session loop needs to poll the in-flight fetch while the
//! API stays free for user commands.

use crate::commands;
use crate::error::Result;
use crate::model::{CategoryFilter, Quote, Scope};
use crate::repository::QuoteRepository;
use crate::store::{QuoteStore, StorageBackend};
use crate::sync::{RemoteSource, SyncEngine};
use rand::Rng;
use serde_json::Value;
use std::path::Path;

pub struct QuipApi<B: StorageBackend> {
    repo: QuoteRepository<B>,
    paths: commands::QuipPaths,
}

impl<B: StorageBackend> QuipApi<B> {
    /// Opens the repository for `scope`, seeding defaults on first use.
    pub fn open(backend: B, scope: Scope, paths: commands::QuipPaths) -> Result<Self> {
        let repo = QuoteRepository::open(QuoteStore::with_backend(backend), scope)?;
        Ok(Self { repo, paths })
    }

    pub fn add_quote(&mut self, text: &str, category: &str) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.repo, text, category)
    }

    pub fn random_quote(&mut self) -> Result<commands::CmdResult> {
        self.random_quote_with(&mut rand::thread_rng())
    }

    pub fn random_quote_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<commands::CmdResult> {
        commands::show::random(&mut self.repo, rng)
    }

    pub fn filter_quotes(&mut self, category: &str) -> Result<commands::CmdResult> {
        commands::show::filter(
            &mut self.repo,
            CategoryFilter::parse(category),
            &mut rand::thread_rng(),
        )
    }

    pub fn list_quotes(&self, category: Option<&str>) -> Result<commands::CmdResult> {
        commands::list::run(&self.repo, category.map(CategoryFilter::parse))
    }

    pub fn categories(&self) -> Result<commands::CmdResult> {
        commands::categories::run(&self.repo)
    }

    pub fn last_viewed(&self) -> Result<commands::CmdResult> {
        commands::show::last_viewed(&self.repo)
    }

    pub fn export_quotes(&self, path: Option<&Path>) -> Result<commands::CmdResult> {
        commands::export::run(&self.repo, path)
    }

    pub fn import_quotes(&mut self, path: &Path) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.repo, path)
    }

    /// Merges a payload fetched by `engine` into the repository.
    pub fn apply_remote<R: RemoteSource + 'static>(
        &mut self,
        engine: &mut SyncEngine<R>,
        fetched: Result<Value>,
    ) -> commands::CmdResult {
        let outcome = engine.apply(fetched, &mut self.repo);
        commands::sync::report(&outcome)
    }

    /// Runs one full sync cycle and waits for it.
    pub async fn sync<R: RemoteSource + 'static>(
        &mut self,
        engine: &mut SyncEngine<R>,
    ) -> commands::CmdResult {
        let outcome = engine.run_cycle(&mut self.repo).await;
        commands::sync::report(&outcome)
    }

    pub async fn push_quote<R: RemoteSource + 'static>(
        &self,
        engine: &SyncEngine<R>,
        quote: &Quote,
    ) -> commands::CmdResult {
        commands::sync::push(engine, quote).await
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, self.repo.scope(), action)
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.paths, self.repo.scope())
    }

    pub fn repository(&self) -> &QuoteRepository<B> {
        &self.repo
    }

    pub fn scope(&self) -> Scope {
        self.repo.scope()
    }

    pub fn paths(&self) -> &commands::QuipPaths {
        &self.paths
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CategoryChoice, CmdMessage, CmdResult, MessageLevel, QuipPaths, Shown};

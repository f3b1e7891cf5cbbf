//! # Remote Sync
//!
//! quip can pull quotes from a remote HTTP endpoint and push newly added ones
//! back. The remote is reached through the [`RemoteSource`] trait so the
//! engine can be exercised against [`mock::ScriptedRemote`] in tests and
//! [`http::HttpRemote`] in production.
//!
//! ## Sync Cycle
//!
//! ```text
//! Idle ──begin──▶ Fetching ──ok──▶ Merging ──▶ Idle
//!                    │
//!                    └──error──▶ FetchFailed
//! ```
//!
//! - The fetch runs as a spawned task that only returns the payload. Merging
//!   happens back on the caller's task, so the repository is never shared.
//! - At most one fetch is in flight: [`SyncEngine::begin`] refuses to start a
//!   second one. A timer tick that lands during a slow fetch is simply skipped.
//! - There is no retry. A failed cycle waits for the next tick.
//! - Merge authority is timestamp-wins (see [`crate::merge`]); remote entries
//!   must carry a parseable `updatedAt`, otherwise they are skipped.

use crate::error::Result;
use crate::model::Quote;
use async_trait::async_trait;
use serde_json::Value;

pub mod engine;
pub mod http;
#[cfg(any(test, feature = "test_utils"))]
pub mod mock;

pub use engine::{SyncEngine, SyncOutcome, SyncState};

/// A remote quote source.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Read the remote quote list as raw JSON. Shape validation is the
    /// engine's job, not the source's.
    async fn fetch(&self) -> Result<Value>;

    /// Best-effort write of a single new quote.
    async fn push(&self, quote: &Quote) -> Result<()>;
}

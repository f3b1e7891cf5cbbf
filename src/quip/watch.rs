//! # Watch Session Driver
//!
//! The interactive session reacts to three event sources: input lines, the
//! sync interval, and completion of the in-flight fetch. [`Watch`] multiplexes
//! them with `select!` and hands the caller only what it has to act on:
//!
//! - a line of input ([`WatchEvent::Line`])
//! - the merged result of a finished fetch ([`WatchEvent::Synced`])
//! - end of input ([`WatchEvent::Closed`])
//!
//! Interval ticks never surface. The first tick completes immediately, so a
//! session with a remote starts a fetch before it reads any input. A tick that
//! lands while a fetch is still in flight is skipped. Merging happens inside
//! [`Watch::next_event`] on the caller's task, through the [`QuipApi`] it is
//! given, so the repository is only touched from one place.
//!
//! Input is read through [`LineInput`]: stdin lines in the binary, a channel
//! in tests.

use crate::api::{CmdResult, QuipApi};
use crate::error::Result;
use crate::store::StorageBackend;
use crate::sync::{RemoteSource, SyncEngine};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::debug;

/// A source of input lines. `None` means the input is closed.
///
/// Implementations must be cancel safe: a dropped `next_line` call loses no
/// input.
#[async_trait]
pub trait LineInput: Send {
    async fn next_line(&mut self) -> Result<Option<String>>;
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> LineInput for Lines<R> {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(Lines::next_line(self).await?)
    }
}

#[async_trait]
impl LineInput for mpsc::Receiver<String> {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.recv().await)
    }
}

#[derive(Debug)]
pub enum WatchEvent {
    Line(String),
    Synced(CmdResult),
    Closed,
}

pub struct Watch<R: RemoteSource + 'static, I: LineInput> {
    engine: Option<SyncEngine<R>>,
    ticker: Interval,
    input: I,
}

impl<R: RemoteSource + 'static, I: LineInput> Watch<R, I> {
    /// A session syncing every `every` when `engine` is set.
    pub fn new(engine: Option<SyncEngine<R>>, every: Duration, input: I) -> Self {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            engine,
            ticker,
            input,
        }
    }

    pub fn engine(&self) -> Option<&SyncEngine<R>> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut SyncEngine<R>> {
        self.engine.as_mut()
    }

    /// Waits for the next event the caller has to handle, starting fetches on
    /// interval ticks along the way. Cancel safe.
    pub async fn next_event<B: StorageBackend>(
        &mut self,
        api: &mut QuipApi<B>,
    ) -> Result<WatchEvent> {
        loop {
            tokio::select! {
                line = self.input.next_line() => {
                    return Ok(match line? {
                        Some(line) => WatchEvent::Line(line),
                        None => WatchEvent::Closed,
                    });
                }
                _ = self.ticker.tick(), if self.engine.is_some() => {
                    if let Some(engine) = self.engine.as_mut() {
                        if !engine.begin() {
                            debug!("sync tick skipped, previous fetch still in flight");
                        }
                    }
                }
                fetched = completed(&mut self.engine) => {
                    if let Some(engine) = self.engine.as_mut() {
                        return Ok(WatchEvent::Synced(api.apply_remote(engine, fetched)));
                    }
                }
            }
        }
    }
}

/// Completion of the in-flight fetch; pends forever without a remote.
async fn completed<R: RemoteSource + 'static>(engine: &mut Option<SyncEngine<R>>) -> Result<Value> {
    match engine {
        Some(engine) => engine.completed().await,
        None => std::future::pending().await,
    }
}

use super::RemoteSource;
use crate::error::{QuipError, Result};
use crate::merge::MergeReport;
use crate::model::Quote;
use crate::repository::QuoteRepository;
use crate::schema::{self, Strictness};
use crate::store::StorageBackend;
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Fetching,
    Merging,
    /// The last cycle failed. Behaves like `Idle` for the next `begin`.
    FetchFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Merged {
        report: MergeReport,
        accepted: usize,
        rejected: usize,
    },
    Failed(String),
    /// A fetch was already in flight; nothing was started.
    Busy,
}

pub struct SyncEngine<R: RemoteSource + 'static> {
    remote: Arc<R>,
    in_flight: Option<JoinHandle<Result<Value>>>,
    state: SyncState,
}

impl<R: RemoteSource + 'static> SyncEngine<R> {
    pub fn new(remote: R) -> Self {
        Self::from_shared(Arc::new(remote))
    }

    pub fn from_shared(remote: Arc<R>) -> Self {
        Self {
            remote,
            in_flight: None,
            state: SyncState::Idle,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts a fetch in the background. Returns false, and starts nothing,
    /// when a previous fetch has not been collected yet.
    pub fn begin(&mut self) -> bool {
        if self.in_flight.is_some() {
            debug!("sync already in flight, not starting another");
            return false;
        }

        let remote = Arc::clone(&self.remote);
        self.in_flight = Some(tokio::spawn(async move { remote.fetch().await }));
        self.state = SyncState::Fetching;
        debug!("sync started");
        true
    }

    /// Waits for the in-flight fetch. Pends forever when nothing is in
    /// flight, which makes it safe to use as a guarded `select!` branch.
    /// Cancel safe: dropping the future leaves the fetch in flight.
    pub async fn completed(&mut self) -> Result<Value> {
        let joined = match self.in_flight.as_mut() {
            Some(handle) => handle.await,
            None => return std::future::pending().await,
        };
        self.in_flight = None;
        joined.map_err(|e| QuipError::Transport(format!("sync task aborted: {}", e)))?
    }

    /// Validates a fetched payload and merges it into the repository.
    pub fn apply<B: StorageBackend>(
        &mut self,
        fetched: Result<Value>,
        repo: &mut QuoteRepository<B>,
    ) -> SyncOutcome {
        let values = match fetched {
            Ok(Value::Array(values)) => values,
            Ok(_) => return self.fail("remote payload is not a list".to_string()),
            Err(e) => return self.fail(e.to_string()),
        };

        self.state = SyncState::Merging;
        let validated = schema::partition(&values, Strictness::Remote);
        for (index, reason) in &validated.rejected {
            warn!(index, %reason, "skipping malformed remote quote");
        }

        match repo.merge(&validated.accepted) {
            Ok(report) => {
                self.state = SyncState::Idle;
                info!(
                    changed = report.changed,
                    accepted = validated.accepted.len(),
                    rejected = validated.rejected.len(),
                    "sync merged"
                );
                SyncOutcome::Merged {
                    report,
                    accepted: validated.accepted.len(),
                    rejected: validated.rejected.len(),
                }
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// One full cycle: begin, wait, merge.
    pub async fn run_cycle<B: StorageBackend>(
        &mut self,
        repo: &mut QuoteRepository<B>,
    ) -> SyncOutcome {
        if !self.begin() {
            return SyncOutcome::Busy;
        }
        let fetched = self.completed().await;
        self.apply(fetched, repo)
    }

    pub async fn push(&self, quote: &Quote) -> Result<()> {
        self.remote.push(quote).await
    }

    fn fail(&mut self, reason: String) -> SyncOutcome {
        warn!(%reason, "sync failed");
        self.state = SyncState::FetchFailed;
        SyncOutcome::Failed(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::QuoteStore;
    use crate::sync::mock::ScriptedRemote;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::time::Duration;

    fn repo_with(quotes: &[Quote]) -> QuoteRepository<MemBackend> {
        let store = QuoteStore::with_backend(MemBackend::new());
        store.save_quotes(crate::model::Scope::Global, quotes).unwrap();
        QuoteRepository::open(store, crate::model::Scope::Global).unwrap()
    }

    #[tokio::test]
    async fn merges_valid_entries_and_skips_invalid_ones() {
        let remote = ScriptedRemote::new().respond(Ok(json!([
            {"text": "New", "category": "Remote", "updatedAt": "2024-02-01T00:00:00Z"},
            {"text": "No timestamp", "category": "Remote"},
            "garbage"
        ])));
        let mut engine = SyncEngine::new(remote);
        let mut repo = repo_with(&[]);

        let outcome = engine.run_cycle(&mut repo).await;
        match outcome {
            SyncOutcome::Merged {
                report,
                accepted,
                rejected,
            } => {
                assert!(report.changed);
                assert_eq!(report.added, 1);
                assert_eq!(accepted, 1);
                assert_eq!(rejected, 2);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(repo.quotes().len(), 1);
        assert_eq!(engine.state(), SyncState::Idle);
        assert!(!engine.is_in_flight());
    }

    #[tokio::test]
    async fn newer_remote_replaces_local() {
        let local = Quote::at("Q", "C", Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        let remote = ScriptedRemote::new().respond(Ok(json!([
            {"text": "Q", "category": "C", "updatedAt": "2021-01-01T00:00:00.000Z"}
        ])));
        let mut engine = SyncEngine::new(remote);
        let mut repo = repo_with(&[local]);

        engine.run_cycle(&mut repo).await;
        assert_eq!(
            repo.quotes()[0].updated_at,
            Some(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn repeated_snapshot_is_a_no_op() {
        let snapshot = json!([
            {"text": "A", "category": "X", "updatedAt": "2024-01-01"}
        ]);
        let remote = ScriptedRemote::new()
            .respond(Ok(snapshot.clone()))
            .respond(Ok(snapshot));
        let mut engine = SyncEngine::new(remote);
        let mut repo = repo_with(&[]);

        engine.run_cycle(&mut repo).await;
        let second = engine.run_cycle(&mut repo).await;
        assert!(matches!(
            second,
            SyncOutcome::Merged { report, .. } if !report.changed
        ));
        assert_eq!(repo.quotes().len(), 1);
    }

    #[tokio::test]
    async fn transport_failure_leaves_repository_untouched() {
        let remote = ScriptedRemote::new().respond(Err(QuipError::Transport(
            "status: 503 Service Unavailable".to_string(),
        )));
        let mut engine = SyncEngine::new(remote);
        let mut repo = repo_with(&[Quote::undated("A", "X")]);

        let outcome = engine.run_cycle(&mut repo).await;
        assert!(matches!(outcome, SyncOutcome::Failed(ref r) if r.contains("503")));
        assert_eq!(engine.state(), SyncState::FetchFailed);
        assert_eq!(repo.quotes(), &[Quote::undated("A", "X")]);
    }

    #[tokio::test]
    async fn non_list_payload_is_a_failed_fetch() {
        let remote = ScriptedRemote::new().respond(Ok(json!({"quotes": []})));
        let mut engine = SyncEngine::new(remote);
        let mut repo = repo_with(&[Quote::undated("A", "X")]);

        let outcome = engine.run_cycle(&mut repo).await;
        assert_eq!(
            outcome,
            SyncOutcome::Failed("remote payload is not a list".to_string())
        );
        assert_eq!(repo.quotes().len(), 1);
    }

    #[tokio::test]
    async fn only_one_fetch_in_flight() {
        let remote = ScriptedRemote::new()
            .with_delay(Duration::from_millis(50))
            .respond(Ok(json!([])));
        let mut engine = SyncEngine::new(remote);
        let mut repo = repo_with(&[]);

        assert!(engine.begin());
        assert!(!engine.begin());
        assert_eq!(engine.state(), SyncState::Fetching);
        assert_eq!(engine.run_cycle(&mut repo).await, SyncOutcome::Busy);

        let fetched = engine.completed().await;
        let outcome = engine.apply(fetched, &mut repo);
        assert!(matches!(outcome, SyncOutcome::Merged { .. }));
        assert!(engine.begin());
    }

    #[tokio::test]
    async fn dropped_wait_keeps_fetch_in_flight() {
        let remote = ScriptedRemote::new()
            .with_delay(Duration::from_millis(100))
            .respond(Ok(json!([])));
        let mut engine = SyncEngine::new(remote);
        engine.begin();

        let waited = tokio::time::timeout(Duration::from_millis(5), engine.completed()).await;
        assert!(waited.is_err());
        assert!(engine.is_in_flight());

        assert!(engine.completed().await.is_ok());
        assert!(!engine.is_in_flight());
    }

    #[tokio::test]
    async fn push_forwards_to_remote() {
        let remote = Arc::new(ScriptedRemote::new());
        let engine = SyncEngine::from_shared(Arc::clone(&remote));
        engine.push(&Quote::undated("A", "X")).await.unwrap();
        assert_eq!(remote.pushed(), vec![Quote::undated("A", "X")]);
    }
}

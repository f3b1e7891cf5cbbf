use super::RemoteSource;
use crate::error::{QuipError, Result};
use crate::model::Quote;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory remote that replays scripted responses, in order.
/// Once the script is exhausted every fetch returns an empty list.
#[derive(Default)]
pub struct ScriptedRemote {
    responses: Mutex<VecDeque<Result<Value>>>,
    pushed: Mutex<Vec<Quote>>,
    fetches: AtomicUsize,
    delay: Option<Duration>,
    fail_push: bool,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Result<Value>) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
        self
    }

    /// Every fetch sleeps this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    /// Number of fetches started so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn pushed(&self) -> Vec<Quote> {
        self.pushed
            .lock()
            .map(|pushed| pushed.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RemoteSource for ScriptedRemote {
    async fn fetch(&self) -> Result<Value> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self
            .responses
            .lock()
            .map_err(|_| QuipError::Transport("scripted remote poisoned".to_string()))?
            .pop_front();
        next.unwrap_or_else(|| Ok(json!([])))
    }

    async fn push(&self, quote: &Quote) -> Result<()> {
        if self.fail_push {
            return Err(QuipError::Transport("status: 500 Internal Server Error".to_string()));
        }
        self.pushed
            .lock()
            .map_err(|_| QuipError::Transport("scripted remote poisoned".to_string()))?
            .push(quote.clone());
        Ok(())
    }
}

use crate::commands::{CmdMessage, CmdResult};
use crate::model::Quote;
use crate::sync::{RemoteSource, SyncEngine, SyncOutcome};

/// Turns a finished sync cycle into user-facing messages.
/// Failures are warnings: the local list is untouched and the next cycle retries.
pub fn report(outcome: &SyncOutcome) -> CmdResult {
    let mut result = CmdResult::default();
    match outcome {
        SyncOutcome::Merged {
            report,
            accepted,
            rejected,
        } => {
            result.changed = report.changed;
            if report.changed {
                result.add_message(CmdMessage::success(format!(
                    "Synced: {} added, {} updated",
                    report.added, report.updated
                )));
            } else {
                result.add_message(CmdMessage::info(format!(
                    "Synced: already up to date ({} remote quote{})",
                    accepted,
                    if *accepted == 1 { "" } else { "s" }
                )));
            }
            if *rejected > 0 {
                result.add_message(CmdMessage::warning(format!(
                    "Skipped {} malformed remote quote{}",
                    rejected,
                    if *rejected == 1 { "" } else { "s" }
                )));
            }
        }
        SyncOutcome::Failed(reason) => {
            result.add_message(CmdMessage::warning(format!("Sync failed: {}", reason)));
        }
        SyncOutcome::Busy => {
            result.add_message(CmdMessage::info("Sync already in progress"));
        }
    }
    result
}

/// Pushes a newly added quote. Never fails the caller.
pub async fn push<R: RemoteSource + 'static>(engine: &SyncEngine<R>, quote: &Quote) -> CmdResult {
    let mut result = CmdResult::default();
    if let Err(e) = engine.push(quote).await {
        tracing::warn!(error = %e, "push failed");
        result.add_message(CmdMessage::warning(format!(
            "Quote saved locally but could not be sent: {}",
            e
        )));
    }
    result
}

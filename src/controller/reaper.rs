//! Per-process reaper
//!
//! Waits for a launched process to exit, records the outcome on the handle
//! and logs it. It never touches the registry: if the channel has since been
//! reused by a newer process, removing "its" entry would remove the wrong one.

use crate::launcher::{ExitOutcome, StreamProcess};
use crate::registry::ExitSlot;
use crate::stream::Channel;

pub(crate) async fn reap<P: StreamProcess>(
    channel: Channel,
    pid: Option<u32>,
    process: P,
    exit: ExitSlot,
) -> ExitOutcome {
    let outcome = process.wait().await;

    match &outcome {
        ExitOutcome::Cancelled => {
            tracing::info!(channel = %channel, pid = ?pid, "Stream process stopped");
        }
        outcome if outcome.is_expected() => {
            tracing::info!(channel = %channel, pid = ?pid, "Stream process exited cleanly");
        }
        outcome => {
            tracing::error!(
                channel = %channel,
                pid = ?pid,
                outcome = %outcome,
                "Stream process exited with error"
            );
        }
    }

    // Each handle gets its own slot, so this is the only write
    let _ = exit.set(outcome.clone());
    outcome
}

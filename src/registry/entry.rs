//! Active stream handles
//!
//! A handle is what the registry stores per channel. It owns the stream's
//! cancellation token; the process itself belongs to the reaper task.

use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::launcher::ExitOutcome;
use crate::stream::{Channel, StreamSpec};

/// Exit outcome written once by the reaper
pub type ExitSlot = Arc<OnceLock<ExitOutcome>>;

/// Handle to a launched stream
#[derive(Debug)]
pub struct ActiveStream {
    /// Stops the process when cancelled
    cancel: CancellationToken,

    /// OS process id (None for processes without one)
    pid: Option<u32>,

    /// Spec the stream was started with
    spec: StreamSpec,

    /// Resolved output sink or device
    sink: String,

    /// When the process was launched
    started_at: Instant,

    /// Filled in by the reaper once the process has exited
    exit: ExitSlot,
}

impl ActiveStream {
    /// Create a handle for a freshly launched process
    pub fn new(
        cancel: CancellationToken,
        pid: Option<u32>,
        spec: StreamSpec,
        sink: impl Into<String>,
    ) -> Self {
        Self {
            cancel,
            pid,
            spec,
            sink: sink.into(),
            started_at: Instant::now(),
            exit: Arc::new(OnceLock::new()),
        }
    }

    /// Request termination of the process
    ///
    /// This is a request; the reaper observes the actual exit.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn spec(&self) -> &StreamSpec {
        &self.spec
    }

    pub fn sink(&self) -> &str {
        &self.sink
    }

    /// Slot shared with the reaper
    pub fn exit_slot(&self) -> ExitSlot {
        Arc::clone(&self.exit)
    }

    /// Exit outcome, once the reaper has observed one
    pub fn exit(&self) -> Option<&ExitOutcome> {
        self.exit.get()
    }

    /// Time since launch
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Snapshot of this handle
    pub fn status(&self, channel: Channel) -> StreamStatus {
        StreamStatus {
            channel,
            pid: self.pid,
            source: self.spec.source.clone(),
            loop_input: self.spec.loop_input,
            sink: self.sink.clone(),
            uptime: self.uptime(),
            exit: self.exit().cloned(),
        }
    }
}

/// Read-only view of a registry entry
#[derive(Debug, Clone, PartialEq)]
pub struct StreamStatus {
    pub channel: Channel,
    pub pid: Option<u32>,
    pub source: String,
    pub loop_input: bool,
    pub sink: String,
    pub uptime: Duration,
    /// `Some` when the process has exited but the entry was never stopped
    pub exit: Option<ExitOutcome>,
}

impl StreamStatus {
    /// The process is gone but the channel is still occupied
    pub fn is_stale(&self) -> bool {
        self.exit.is_some()
    }
}

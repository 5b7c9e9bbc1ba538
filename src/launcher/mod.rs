//! Process launching
//!
//! The controller never spawns processes itself. It hands a fixed-order
//! argument list and a cancellation token to a [`ProcessLauncher`] and gets
//! back a [`StreamProcess`] that the reaper task owns from then on.
//!
//! ```text
//!   StreamController::start()
//!          │  build_args(channel, spec, config)
//!          ▼
//!   ProcessLauncher::launch(channel, args, token) ──► StreamProcess
//!                                                          │
//!                                       reaper task: process.wait()
//!                                                          │
//!                token.cancel() ──► kill ──► ExitOutcome::Cancelled
//! ```
//!
//! The token passed to `launch` is created by the controller, not taken from
//! the caller, so a process outlives the request that started it.

pub mod args;
pub mod command;

use std::future::Future;
use std::process::ExitStatus;

use tokio_util::sync::CancellationToken;

use crate::stream::Channel;

pub use args::{build_args, output_sink};
pub use command::{CommandLauncher, CommandProcess};

/// How a launched process ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Terminated because its cancellation token fired
    Cancelled,
    /// Exited on its own with status zero
    Completed,
    /// Exited on its own with a non-zero status (`None` when killed by a signal)
    Failed { code: Option<i32> },
    /// The exit status could not be collected
    WaitFailed(String),
}

impl ExitOutcome {
    /// Classify a collected exit status
    pub fn from_status(status: std::io::Result<ExitStatus>, cancelled: bool) -> Self {
        match status {
            Err(e) => ExitOutcome::WaitFailed(e.to_string()),
            Ok(_) if cancelled => ExitOutcome::Cancelled,
            Ok(status) if status.success() => ExitOutcome::Completed,
            Ok(status) => ExitOutcome::Failed {
                code: status.code(),
            },
        }
    }

    /// Whether the exit is a normal end of the stream: cancelled on request
    /// or finished with status zero
    pub fn is_expected(&self) -> bool {
        matches!(self, ExitOutcome::Cancelled | ExitOutcome::Completed)
    }
}

impl std::fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitOutcome::Cancelled => write!(f, "cancelled"),
            ExitOutcome::Completed => write!(f, "completed"),
            ExitOutcome::Failed { code: Some(code) } => write!(f, "exited with status {}", code),
            ExitOutcome::Failed { code: None } => write!(f, "terminated by signal"),
            ExitOutcome::WaitFailed(e) => write!(f, "wait failed: {}", e),
        }
    }
}

/// A running process bound to a cancellation token
pub trait StreamProcess: Send + 'static {
    /// OS process id, if the process has one
    fn id(&self) -> Option<u32>;

    /// Wait for the process to exit
    ///
    /// When the token given at launch fires, implementations must terminate
    /// the process (not merely stop waiting) and resolve to
    /// [`ExitOutcome::Cancelled`].
    fn wait(self) -> impl Future<Output = ExitOutcome> + Send;
}

/// Starts external processes for the controller
pub trait ProcessLauncher: Send + Sync + 'static {
    type Process: StreamProcess;

    /// Start a process asynchronously and return without waiting for it
    fn launch(
        &self,
        channel: Channel,
        args: &[String],
        cancel: CancellationToken,
    ) -> std::io::Result<Self::Process>;
}

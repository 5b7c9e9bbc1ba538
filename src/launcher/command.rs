//! `tokio::process` launcher

use std::future::Future;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

use super::{ExitOutcome, ProcessLauncher, StreamProcess};
use crate::stream::Channel;

/// Launches a real external program
#[derive(Debug, Clone)]
pub struct CommandLauncher {
    program: String,
}

impl CommandLauncher {
    /// Create a launcher for the given program
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ProcessLauncher for CommandLauncher {
    type Process = CommandProcess;

    fn launch(
        &self,
        channel: Channel,
        args: &[String],
        cancel: CancellationToken,
    ) -> std::io::Result<CommandProcess> {
        tracing::debug!(
            channel = %channel,
            program = %self.program,
            args = %args.join(" "),
            "Spawning stream process"
        );

        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        Ok(CommandProcess { child, cancel })
    }
}

/// Child process plus the token that stops it
#[derive(Debug)]
pub struct CommandProcess {
    child: Child,
    cancel: CancellationToken,
}

impl StreamProcess for CommandProcess {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    fn wait(mut self) -> impl Future<Output = ExitOutcome> + Send {
        async move {
            let exited = tokio::select! {
                status = self.child.wait() => Some(status),
                _ = self.cancel.cancelled() => None,
            };

            let status = match exited {
                Some(status) => status,
                None => {
                    // Fails only if the child was already reaped
                    if let Err(e) = self.child.start_kill() {
                        tracing::debug!(error = %e, "Kill after cancellation failed");
                    }
                    self.child.wait().await
                }
            };

            ExitOutcome::from_status(status, self.cancel.is_cancelled())
        }
    }
}

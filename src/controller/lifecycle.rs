//! Stream controller implementation
//!
//! Per channel, a stream is Absent or Running. The registry lock is held
//! for the whole of "check existing → cancel old → launch new → install
//! new", so concurrent calls on a channel apply in some total order.

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use super::config::ControllerConfig;
use super::reaper;
use crate::error::{Error, Result};
use crate::launcher::{build_args, output_sink, CommandLauncher, ProcessLauncher, StreamProcess};
use crate::registry::{ActiveStream, StreamRegistry, StreamStatus};
use crate::stream::{Channel, StreamSpec};

/// Starts, replaces and stops one streaming process per channel
pub struct StreamController<L: ProcessLauncher = CommandLauncher> {
    config: ControllerConfig,
    launcher: L,
    registry: StreamRegistry,
    /// Parent of every process token
    root: CancellationToken,
    /// Reaper tasks
    reapers: TaskTracker,
}

impl StreamController<CommandLauncher> {
    /// Create a controller that launches `config.program`
    pub fn new(config: ControllerConfig) -> Self {
        let launcher = CommandLauncher::new(config.program.clone());
        Self::with_launcher(config, launcher)
    }
}

impl<L: ProcessLauncher> StreamController<L> {
    /// Create a controller with a custom launcher
    pub fn with_launcher(config: ControllerConfig, launcher: L) -> Self {
        Self {
            config,
            launcher,
            registry: StreamRegistry::new(),
            root: CancellationToken::new(),
            reapers: TaskTracker::new(),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Get a reference to the stream registry
    pub fn registry(&self) -> &StreamRegistry {
        &self.registry
    }

    /// Start a stream on a channel
    ///
    /// Fails with [`Error::AlreadyRunning`] if the channel is occupied and
    /// `spec.restart` is false. With `restart` set, the existing process is
    /// cancelled and replaced without waiting for it to exit. Fails with
    /// [`Error::ShutDown`] once [`shutdown`](Self::shutdown) has begun.
    pub async fn start(&self, channel: &str, spec: StreamSpec) -> Result<()> {
        let channel: Channel = channel.parse()?;
        spec.validate()?;

        let mut streams = self.registry.lock().await;

        // Checked under the lock: shutdown cancels the root before draining
        if self.root.is_cancelled() {
            tracing::warn!(channel = %channel, "Start rejected: controller is shut down");
            return Err(Error::ShutDown);
        }

        if let Some(existing) = streams.get(channel) {
            if !spec.restart {
                tracing::warn!(
                    channel = %channel,
                    pid = ?existing.pid(),
                    "Start rejected: stream already running"
                );
                return Err(Error::AlreadyRunning(channel));
            }
        }

        if let Some(old) = streams.delete(channel) {
            old.cancel();
            tracing::info!(
                channel = %channel,
                pid = ?old.pid(),
                source = %old.spec().source,
                "Superseding running stream"
            );
        }

        let args = build_args(channel, &spec, &self.config);
        let sink = output_sink(channel, &spec, &self.config).to_string();

        let cancel = self.root.child_token();
        let process = self
            .launcher
            .launch(channel, &args, cancel.clone())
            .map_err(|source| {
                tracing::error!(
                    channel = %channel,
                    source_url = %spec.source,
                    error = %source,
                    "Failed to start stream process"
                );
                Error::LaunchFailed { channel, source }
            })?;

        let pid = process.id();
        let source = spec.source.clone();
        let stream = ActiveStream::new(cancel, pid, spec, sink);
        let exit = stream.exit_slot();
        streams.set(channel, stream);
        drop(streams);

        self.reapers.spawn(reaper::reap(channel, pid, process, exit));

        tracing::info!(channel = %channel, pid = ?pid, source = %source, "Stream started");
        Ok(())
    }

    /// Stop the stream on a channel
    ///
    /// Cancellation is requested and the entry removed; the reaper observes
    /// the actual exit.
    pub async fn stop(&self, channel: &str) -> Result<()> {
        let channel: Channel = channel.parse()?;

        let mut streams = self.registry.lock().await;
        let Some(stream) = streams.delete(channel) else {
            tracing::warn!(channel = %channel, "Stop rejected: no stream running");
            return Err(Error::NotRunning(channel));
        };
        stream.cancel();
        drop(streams);

        tracing::info!(channel = %channel, pid = ?stream.pid(), "Stream stop requested");
        Ok(())
    }

    /// Status of a channel's entry, stale or not
    pub async fn status(&self, channel: &str) -> Result<Option<StreamStatus>> {
        let channel: Channel = channel.parse()?;
        Ok(self.registry.status(channel).await)
    }

    /// Whether a channel has an entry whose process has not been seen to exit
    pub async fn is_running(&self, channel: &str) -> Result<bool> {
        Ok(self
            .status(channel)
            .await?
            .is_some_and(|status| !status.is_stale()))
    }

    /// Status of every entry, ordered by channel
    pub async fn list(&self) -> Vec<StreamStatus> {
        self.registry.snapshot().await
    }

    /// Cancel and remove every entry, returning how many there were
    pub async fn stop_all(&self) -> usize {
        let drained = self.registry.lock().await.drain();

        for (channel, stream) in &drained {
            stream.cancel();
            tracing::info!(channel = %channel, pid = ?stream.pid(), "Stream stop requested");
        }

        drained.len()
    }

    /// Stop everything and wait for every reaper to finish
    ///
    /// This also reaches processes that were superseded but have not exited
    /// yet. Shutdown is terminal: later calls to `start` fail with
    /// [`Error::ShutDown`] without launching anything.
    pub async fn shutdown(&self) {
        self.root.cancel();
        let stopped = self.stop_all().await;
        self.reapers.close();

        tracing::info!(
            stopped = stopped,
            pending = self.reapers.len(),
            "Waiting for stream processes to exit"
        );
        self.reapers.wait().await;
    }

    /// Whether [`shutdown`](Self::shutdown) has been called
    pub fn is_shut_down(&self) -> bool {
        self.root.is_cancelled()
    }

    /// Number of reapers still waiting on a process
    pub fn pending_reapers(&self) -> usize {
        self.reapers.len()
    }
}

impl Default for StreamController<CommandLauncher> {
    fn default() -> Self {
        Self::new(ControllerConfig::from_env())
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::atomic::{AtomicU32, Ordering};

    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::launcher::ExitOutcome;

    /// Processes that only end when cancelled
    #[derive(Default)]
    struct IdleLauncher {
        next_pid: AtomicU32,
    }

    struct IdleProcess {
        pid: u32,
        cancel: CancellationToken,
    }

    impl StreamProcess for IdleProcess {
        fn id(&self) -> Option<u32> {
            Some(self.pid)
        }

        fn wait(self) -> impl Future<Output = ExitOutcome> + Send {
            async move {
                self.cancel.cancelled().await;
                ExitOutcome::Cancelled
            }
        }
    }

    impl ProcessLauncher for IdleLauncher {
        type Process = IdleProcess;

        fn launch(
            &self,
            _channel: Channel,
            _args: &[String],
            cancel: CancellationToken,
        ) -> std::io::Result<IdleProcess> {
            let pid = self.next_pid.fetch_add(1, Ordering::Relaxed) + 100;
            Ok(IdleProcess { pid, cancel })
        }
    }

    fn controller() -> StreamController<IdleLauncher> {
        StreamController::with_launcher(ControllerConfig::default(), IdleLauncher::default())
    }

    #[tokio::test]
    async fn test_start_stop() {
        let controller = controller();

        assert_ok!(controller.start("audio", StreamSpec::new("a.mp3")).await);
        assert!(controller.is_running("audio").await.unwrap());

        assert_ok!(controller.stop("audio").await);
        assert!(!controller.is_running("audio").await.unwrap());
        assert!(controller.registry().is_empty().await);
    }

    #[tokio::test]
    async fn test_invalid_channel() {
        let controller = controller();

        let err = assert_err!(controller.start("both", StreamSpec::new("a.mp3")).await);
        assert!(matches!(err, Error::InvalidChannel(_)));
        assert_eq!(controller.launcher().next_pid.load(Ordering::Relaxed), 0);

        let err = assert_err!(controller.stop("subtitles").await);
        assert!(matches!(err, Error::InvalidChannel(_)));
    }

    #[tokio::test]
    async fn test_invalid_spec_not_launched() {
        let controller = controller();

        let err = assert_err!(controller.start("video", StreamSpec::new("")).await);
        assert!(matches!(err, Error::InvalidSpec(_)));
        assert_eq!(controller.launcher().next_pid.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_status_reports_resolved_sink() {
        let controller = controller();
        controller
            .start("video", StreamSpec::new("clip.mp4").looped(true))
            .await
            .unwrap();

        let status = controller.status("video").await.unwrap().unwrap();
        assert_eq!(status.channel, Channel::Video);
        assert_eq!(status.sink, "/dev/video10");
        assert_eq!(status.pid, Some(100));
        assert!(status.loop_input);
        assert!(controller.status("audio").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_shutdown_waits_for_reapers() {
        let controller = controller();
        controller.start("audio", StreamSpec::new("a.mp3")).await.unwrap();
        controller.start("video", StreamSpec::new("v.mp4")).await.unwrap();
        assert_eq!(controller.pending_reapers(), 2);

        controller.shutdown().await;

        assert_eq!(controller.pending_reapers(), 0);
        assert!(controller.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_start_after_shutdown_rejected() {
        let controller = controller();
        controller.shutdown().await;
        assert!(controller.is_shut_down());

        let err = assert_err!(controller.start("audio", StreamSpec::new("a.mp3")).await);
        assert!(matches!(err, Error::ShutDown));
        assert_eq!(controller.launcher().next_pid.load(Ordering::Relaxed), 0);
        assert!(controller.registry().is_empty().await);
        assert_eq!(controller.pending_reapers(), 0);
    }
}

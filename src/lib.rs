//! Per-channel lifecycle control for long-running streaming processes
//!
//! `streamctl` keeps at most one external streaming process (typically
//! `ffmpeg`) per media channel and lets concurrent callers start, replace and
//! stop them safely.
//!
//! ```text
//!  start("audio", spec) ─┐                      ┌─► reaper: wait + log
//!                        ▼                      │
//!              ┌──────────────────┐  launch  ┌──┴──────────────┐
//!  stop(..) ──►│ StreamController │ ───────► │ ProcessLauncher │
//!              │  registry lock   │          └─────────────────┘
//!              └────────┬─────────┘
//!                       ▼
//!        StreamRegistry { audio → handle, video → handle }
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use streamctl::{ControllerConfig, StreamController, StreamSpec};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let controller = StreamController::new(ControllerConfig::from_env());
//!
//!     controller
//!         .start("video", StreamSpec::new("/media/clip.mp4").looped(true))
//!         .await?;
//!
//!     // Replace the running stream with a live source
//!     controller
//!         .start("video", StreamSpec::new("rtmp://example/live/key").restart(true))
//!         .await?;
//!
//!     controller.stop("video").await?;
//!     controller.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! A process that exits on its own keeps its channel occupied; the entry is
//! reported as stale by [`StreamController::status`] until the caller stops
//! or restarts the channel.

pub mod controller;
pub mod error;
pub mod launcher;
pub mod registry;
pub mod stream;

pub use controller::{ControllerConfig, StreamController};
pub use error::{Error, ErrorKind, Result};
pub use launcher::{CommandLauncher, ExitOutcome, ProcessLauncher, StreamProcess};
pub use registry::{StreamRegistry, StreamStatus};
pub use stream::{Channel, StreamSpec};

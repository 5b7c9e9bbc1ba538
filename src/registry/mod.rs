//! Stream registry
//!
//! Maps each channel to the handle of the process currently bound to it.
//!
//! ```text
//!                 StreamRegistry
//!        ┌──────────────────────────────┐
//!        │ Mutex<HashMap<Channel,       │
//!        │   ActiveStream {             │
//!        │     cancel: CancellationToken│
//!        │     pid, spec, sink,         │
//!        │     exit: ExitSlot ◄─────────┼──── reaper writes once
//!        │   }                          │
//!        │ >                            │
//!        └──────────────────────────────┘
//! ```
//!
//! The registry knows nothing about processes. It stores handles and hands
//! out a guard so that check, replace and install run under one lock.

pub mod entry;
pub mod store;

pub use entry::{ActiveStream, ExitSlot, StreamStatus};
pub use store::{RegistryGuard, StreamRegistry};

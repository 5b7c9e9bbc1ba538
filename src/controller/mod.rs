//! Stream controller
//!
//! Owns the registry, the launcher and the reaper tasks. Transport layers
//! call [`StreamController::start`] and [`StreamController::stop`] and map
//! the returned [`Error`](crate::Error) kinds to their own status codes.

pub mod config;
pub mod lifecycle;
mod reaper;

pub use config::ControllerConfig;
pub use lifecycle::StreamController;

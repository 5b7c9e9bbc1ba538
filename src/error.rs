//! Error types
//!
//! Every failure the controller reports is synchronous. Rejections leave the
//! registry exactly as it was before the call. The one exception is a
//! restart whose launch fails: the superseded stream has already been
//! cancelled and removed, so the channel ends up empty.

use crate::stream::Channel;

/// Result type alias for controller operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for controller operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A stream is already running on the channel and restart was not requested
    #[error("stream already running on channel: {0}")]
    AlreadyRunning(Channel),

    /// No stream is registered for the channel
    #[error("no stream running on channel: {0}")]
    NotRunning(Channel),

    /// The channel key names no known output policy
    #[error("invalid media type: {0}")]
    InvalidChannel(String),

    /// The stream spec was rejected before launch
    #[error("invalid stream spec: {0}")]
    InvalidSpec(&'static str),

    /// The external process could not be started
    #[error("failed to start stream on channel {channel}: {source}")]
    LaunchFailed {
        channel: Channel,
        #[source]
        source: std::io::Error,
    },

    /// The controller has been shut down and accepts no new streams
    #[error("controller is shut down")]
    ShutDown,
}

/// Fieldless error classification for transport layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AlreadyRunning,
    NotRunning,
    InvalidChannel,
    InvalidSpec,
    LaunchFailed,
    ShutDown,
}

impl Error {
    /// Classify the error without its payload
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::AlreadyRunning(_) => ErrorKind::AlreadyRunning,
            Error::NotRunning(_) => ErrorKind::NotRunning,
            Error::InvalidChannel(_) => ErrorKind::InvalidChannel,
            Error::InvalidSpec(_) => ErrorKind::InvalidSpec,
            Error::LaunchFailed { .. } => ErrorKind::LaunchFailed,
            Error::ShutDown => ErrorKind::ShutDown,
        }
    }
}

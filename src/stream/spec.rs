//! Caller-supplied stream parameters

use crate::error::{Error, Result};

/// What to stream and how
///
/// Immutable once handed to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSpec {
    /// Input locator (file path or network URL)
    pub source: String,
    /// Loop the input forever
    pub loop_input: bool,
    /// Replace a running stream on the same channel instead of failing
    pub restart: bool,
    /// Sink name (audio) or device path (video); `None` uses the configured default
    pub sink: Option<String>,
}

impl StreamSpec {
    /// Create a spec for the given source with all flags off
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            loop_input: false,
            restart: false,
            sink: None,
        }
    }

    /// Loop the input
    pub fn looped(mut self, loop_input: bool) -> Self {
        self.loop_input = loop_input;
        self
    }

    /// Supersede a running stream on the same channel
    pub fn restart(mut self, restart: bool) -> Self {
        self.restart = restart;
        self
    }

    /// Override the channel's default sink
    pub fn sink(mut self, sink: impl Into<String>) -> Self {
        self.sink = Some(sink.into());
        self
    }

    /// Reject specs that could never produce a working process
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(Error::InvalidSpec("source locator is required"));
        }
        if matches!(self.sink.as_deref(), Some(s) if s.trim().is_empty()) {
            return Err(Error::InvalidSpec("sink must not be empty when given"));
        }
        Ok(())
    }
}

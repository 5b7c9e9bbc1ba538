//! Channel keys
//!
//! A channel names one stream slot. Each channel carries at most one live
//! process at a time.

use std::str::FromStr;

use crate::error::Error;

/// Stream slot identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    /// Audio routed to a PulseAudio sink
    Audio,
    /// Video routed to a v4l2loopback device
    Video,
}

impl Channel {
    /// All known channels, in registry order
    pub const ALL: [Channel; 2] = [Channel::Audio, Channel::Video];

    /// Wire name of the channel
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Audio => "audio",
            Channel::Video => "video",
        }
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "audio" => Ok(Channel::Audio),
            "video" => Ok(Channel::Video),
            _ => Err(Error::InvalidChannel(s.to_string())),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

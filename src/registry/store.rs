//! Stream registry implementation
//!
//! One `tokio::sync::Mutex` guards the whole map. Callers that need to
//! check, replace and install in one step take a [`RegistryGuard`] and do
//! all of it before dropping the guard.

use std::collections::HashMap;

use tokio::sync::{Mutex, MutexGuard};

use super::entry::{ActiveStream, StreamStatus};
use crate::stream::Channel;

/// Locked mapping from channel to active stream handle
#[derive(Debug, Default)]
pub struct StreamRegistry {
    streams: Mutex<HashMap<Channel, ActiveStream>>,
}

impl StreamRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the exclusive lock
    pub async fn lock(&self) -> RegistryGuard<'_> {
        RegistryGuard {
            streams: self.streams.lock().await,
        }
    }

    /// Check whether a channel has an entry
    pub async fn contains(&self, channel: Channel) -> bool {
        self.streams.lock().await.contains_key(&channel)
    }

    /// Number of entries
    pub async fn len(&self) -> usize {
        self.streams.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.streams.lock().await.is_empty()
    }

    /// Snapshot of a single entry
    pub async fn status(&self, channel: Channel) -> Option<StreamStatus> {
        self.streams
            .lock()
            .await
            .get(&channel)
            .map(|stream| stream.status(channel))
    }

    /// Snapshot of every entry, ordered by channel
    pub async fn snapshot(&self) -> Vec<StreamStatus> {
        let streams = self.streams.lock().await;
        let mut statuses: Vec<StreamStatus> = streams
            .iter()
            .map(|(channel, stream)| stream.status(*channel))
            .collect();
        statuses.sort_by_key(|status| status.channel);
        statuses
    }
}

/// Exclusive access to the registry map
///
/// Every operation on the guard happens under the same lock acquisition.
pub struct RegistryGuard<'a> {
    streams: MutexGuard<'a, HashMap<Channel, ActiveStream>>,
}

impl RegistryGuard<'_> {
    pub fn get(&self, channel: Channel) -> Option<&ActiveStream> {
        self.streams.get(&channel)
    }

    /// Install a handle, returning the one it replaced
    pub fn set(&mut self, channel: Channel, stream: ActiveStream) -> Option<ActiveStream> {
        self.streams.insert(channel, stream)
    }

    /// Remove a handle
    pub fn delete(&mut self, channel: Channel) -> Option<ActiveStream> {
        self.streams.remove(&channel)
    }

    /// Remove every handle
    pub fn drain(&mut self) -> Vec<(Channel, ActiveStream)> {
        let mut drained: Vec<_> = self.streams.drain().collect();
        drained.sort_by_key(|(channel, _)| *channel);
        drained
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

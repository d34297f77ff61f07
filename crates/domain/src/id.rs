//! Typed identifier newtypes backed by UUIDs.

use std::fmt;

/// Unique identifier for a client connection.
///
/// Only used to correlate log lines; clients never see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(uuid::Uuid);

impl Default for ConnectionId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl ConnectionId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

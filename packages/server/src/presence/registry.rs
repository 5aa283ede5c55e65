//! Process-wide registry of live connections.
//!
//! Keyed by user id; each user owns a *set* of connections, so a second
//! device or tab never displaces the first. The map synchronizes per key
//! (sharded locking), not with one coarse lock: connect/disconnect storms
//! are far more frequent than message sends and must never queue behind
//! each other globally. No registry operation touches I/O.

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::domain::UserId;

/// Sender half of a connection's event channel. Other parts of the system
/// clone this to push serialized wire events to a specific connection.
pub type ConnectionSender = mpsc::UnboundedSender<String>;

/// One live connection owned by one user.
pub struct ConnectionHandle {
    /// Identifies this connection within the user's set
    pub id: Uuid,
    /// Event channel towards the connection's socket task
    pub sender: ConnectionSender,
    /// Unix timestamp (milliseconds) when the connection registered
    pub connected_at: i64,
}

impl ConnectionHandle {
    /// Create a handle with a fresh connection id.
    pub fn new(sender: ConnectionSender, connected_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            connected_at,
        }
    }
}

/// Authoritative table of user id → live connection set.
///
/// Constructed once at process start and handed to every connection task by
/// `Arc`, so tests can substitute their own instance.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: DashMap<String, Vec<ConnectionHandle>>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Add a connection to the user's set.
    ///
    /// Returns `true` when this was the user's first connection, i.e. the
    /// presence snapshot changed.
    pub fn register(&self, user_id: &UserId, handle: ConnectionHandle) -> bool {
        let mut handles = self
            .connections
            .entry(user_id.as_str().to_string())
            .or_default();
        let came_online = handles.is_empty();
        handles.push(handle);
        came_online
    }

    /// Remove exactly one connection from the user's set.
    ///
    /// Idempotent: unregistering an already-removed handle is a no-op.
    /// Returns `true` when the user's set became empty, i.e. the presence
    /// snapshot changed.
    pub fn unregister(&self, user_id: &UserId, connection_id: Uuid) -> bool {
        let went_offline = match self.connections.get_mut(user_id.as_str()) {
            Some(mut handles) => {
                handles.retain(|handle| handle.id != connection_id);
                handles.is_empty()
            }
            None => false,
        };
        if went_offline {
            // The guard above is dropped before removal; remove_if re-checks
            // emptiness in case a register slipped in between.
            self.connections
                .remove_if(user_id.as_str(), |_, handles| handles.is_empty());
        }
        went_offline
    }

    /// Current senders for the user's connections (possibly empty).
    pub fn lookup(&self, user_id: &UserId) -> Vec<ConnectionSender> {
        self.connections
            .get(user_id.as_str())
            .map(|handles| handles.iter().map(|handle| handle.sender.clone()).collect())
            .unwrap_or_default()
    }

    /// The set of user ids with at least one live connection, sorted for
    /// stable wire payloads.
    pub fn snapshot(&self) -> Vec<String> {
        let mut users: Vec<String> = self
            .connections
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().clone())
            .collect();
        users.sort();
        users
    }

    /// Best-effort send of a payload to every live connection.
    pub fn broadcast(&self, payload: &str) {
        for entry in self.connections.iter() {
            for handle in entry.value() {
                if handle.sender.send(payload.to_string()).is_err() {
                    tracing::warn!(
                        "failed to push broadcast to a connection of '{}'",
                        entry.key()
                    );
                }
            }
        }
    }
}

/**
 * Presence Registry
 *
 * Maps each online user to the connection that most recently registered for
 * them. The registry holds weak senders only: it never keeps a connection's
 * outbound queue alive, and a handle whose connection is gone is treated as
 * absent.
 *
 * # Replacement
 *
 * Registering again for the same user replaces the previous entry without
 * notifying the old connection. When the old connection later closes it only
 * removes the entry if it still owns it (`release`).
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::shared::ServerEvent;

/// Strong handle to one connection's outbound queue
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: Uuid,
    tx: mpsc::UnboundedSender<ServerEvent>,
}

impl ConnectionHandle {
    /// Create a handle together with the receiving end of its queue
    pub fn open() -> (Self, mpsc::UnboundedReceiver<ServerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { id: Uuid::new_v4(), tx }, rx)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Queue an event for this connection
    ///
    /// Returns `false` if the connection has already gone away.
    pub fn send(&self, event: ServerEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Debug)]
struct PresenceEntry {
    connection_id: Uuid,
    tx: mpsc::WeakUnboundedSender<ServerEvent>,
}

impl PresenceEntry {
    fn upgrade(&self) -> Option<ConnectionHandle> {
        self.tx
            .upgrade()
            .filter(|tx| !tx.is_closed())
            .map(|tx| ConnectionHandle {
                id: self.connection_id,
                tx,
            })
    }
}

/// Registry of online users
#[derive(Debug, Clone, Default)]
pub struct PresenceRegistry {
    entries: Arc<Mutex<HashMap<Uuid, PresenceEntry>>>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // The map is never left half-updated, so a poisoned lock is still usable.
    fn entries(&self) -> MutexGuard<'_, HashMap<Uuid, PresenceEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `handle` as the user's current connection (last write wins)
    pub fn register(&self, user_id: Uuid, handle: &ConnectionHandle) {
        let previous = self.entries().insert(
            user_id,
            PresenceEntry {
                connection_id: handle.id,
                tx: handle.tx.downgrade(),
            },
        );

        match previous {
            Some(previous) if previous.connection_id != handle.id => {
                tracing::debug!(
                    "[Presence] User {} moved from connection {} to {}",
                    user_id,
                    previous.connection_id,
                    handle.id
                );
            }
            _ => tracing::debug!("[Presence] User {} registered on {}", user_id, handle.id),
        }
    }

    /// Remove the user's entry, whatever connection owns it
    pub fn unregister(&self, user_id: Uuid) {
        self.entries().remove(&user_id);
    }

    /// Remove the user's entry only if `connection_id` still owns it
    ///
    /// Returns whether an entry was removed.
    pub fn release(&self, user_id: Uuid, connection_id: Uuid) -> bool {
        let mut entries = self.entries();
        match entries.get(&user_id) {
            Some(entry) if entry.connection_id == connection_id => {
                entries.remove(&user_id);
                true
            }
            _ => false,
        }
    }

    /// Current live connection for the user, if any
    pub fn lookup(&self, user_id: Uuid) -> Option<ConnectionHandle> {
        self.entries().get(&user_id).and_then(PresenceEntry::upgrade)
    }

    /// Number of users with a live connection
    pub fn online_count(&self) -> usize {
        self.entries()
            .values()
            .filter(|entry| entry.upgrade().is_some())
            .count()
    }
}

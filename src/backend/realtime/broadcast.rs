/**
 * Real-time Event Broadcasting
 *
 * Events are broadcast using `tokio::sync::broadcast`. Every connection holds
 * a receiver, so every connection gets a copy of each event, including the
 * one whose action triggered it.
 */

use tokio::sync::broadcast;

use crate::shared::ServerEvent;

/// Real-time event broadcast
///
/// ```rust,ignore
/// let (tx, _) = broadcast::channel::<ServerEvent>(1000);
/// let broadcast: RealtimeEventBroadcast = tx;
/// ```
pub type RealtimeEventBroadcast = broadcast::Sender<ServerEvent>;

/// Broadcast an event to all connections
///
/// Returns the number of receivers that got the event (0 if nobody is
/// connected).
pub fn broadcast_event(broadcast_tx: &RealtimeEventBroadcast, event: ServerEvent) -> usize {
    let name = event.name();
    match broadcast_tx.send(event) {
        Ok(subscriber_count) => {
            tracing::info!("[Realtime] '{}' broadcast to {} subscribers", name, subscriber_count);
            subscriber_count
        }
        Err(_) => {
            tracing::debug!("[Realtime] No subscribers to receive '{}'", name);
            0
        }
    }
}

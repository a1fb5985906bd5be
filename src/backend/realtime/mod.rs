//! Real-time Module
//!
//! Persistent WebSocket connections and the routing of events to them.
//!
//! - **`broadcast`** - Fan-out channel every connection subscribes to
//! - **`presence`** - Registry mapping online users to their connection
//! - **`delivery`** - Chat and private message delivery rules
//! - **`gateway`** - WebSocket upgrade handler and per-connection loop
//!
//! ```text
//! realtime/
//! ├── mod.rs       - Module exports and documentation
//! ├── broadcast.rs - Event broadcasting utilities
//! ├── presence.rs  - PresenceRegistry, ConnectionHandle
//! ├── delivery.rs  - Message delivery
//! └── gateway.rs   - WebSocket handler
//! ```
//!
//! # Delivery Rules
//!
//! - Public chat messages, presence changes and post events go to every
//!   connection through the broadcast channel.
//! - A private message goes to the recipient's registered connection, if
//!   any, and an acknowledgement always goes back to the sender's own
//!   connection. Offline recipients read it later over REST.
//! - A user has at most one registered connection; the newest wins.

/// Event broadcasting utilities
pub mod broadcast;

/// Presence registry
pub mod presence;

/// Message delivery
pub mod delivery;

/// WebSocket gateway
pub mod gateway;

pub use broadcast::{broadcast_event, RealtimeEventBroadcast};
pub use gateway::{handle_socket_upgrade, SocketSession};
pub use presence::{ConnectionHandle, PresenceRegistry};

//! Real-time delivery tests
//!
//! - `gateway_test` - `SocketSession` driven directly, together with REST
//! - `socket_test` - real WebSocket connections over a local port

mod gateway_test;

//! In-process presence tracking for live WebSocket connections.

pub mod registry;

pub use registry::{ConnectionHandle, ConnectionRegistry, ConnectionSender};

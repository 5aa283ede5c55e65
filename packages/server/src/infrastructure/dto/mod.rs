//! Data transfer objects for the HTTP API and the WebSocket wire protocol.

pub mod http;
pub mod websocket;

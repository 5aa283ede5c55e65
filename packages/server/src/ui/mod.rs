//! UI layer: axum state, router and HTTP/WebSocket handlers.

pub mod handler;
pub mod runner;
pub mod state;

pub use runner::{ServerConfig, build_router, run_server};

//! Real-time direct-messaging engine for the Tsunagu marketplace.
//!
//! Tracks which users hold live WebSocket connections, resolves the unique
//! conversation thread between two participants, persists messages durably
//! and in order, and pushes freshly persisted messages to any live
//! connections the recipient holds. Delivery is best-effort: a message is
//! sent once it is durable, whether or not anyone received it live.

pub mod delivery;
pub mod domain;
pub mod infrastructure;
pub mod presence;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{ServerConfig, run_server};

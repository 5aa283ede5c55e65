//! Real-time push of persisted messages and presence snapshots.

pub mod dispatcher;

pub use dispatcher::MessageDispatcher;

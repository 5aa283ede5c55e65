//! WebSocket wire event DTOs.
//!
//! The socket carries server-to-client events only: presence snapshots and
//! message pushes.

use serde::{Deserialize, Serialize};

use super::http::MessageDto;

/// Event type enum
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    OnlineUsers,
    NewMessage,
}

/// Full presence set, emitted whenever the set of online users changes
/// (and directly to a connection that registers without changing the set)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineUsersEvent {
    pub r#type: EventType,
    pub users: Vec<String>,
}

impl OnlineUsersEvent {
    pub fn new(users: Vec<String>) -> Self {
        Self {
            r#type: EventType::OnlineUsers,
            users,
        }
    }
}

/// Push of a freshly persisted message to a recipient connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessageEvent {
    pub r#type: EventType,
    pub message: MessageDto,
}

impl NewMessageEvent {
    pub fn new(message: MessageDto) -> Self {
        Self {
            r#type: EventType::NewMessage,
            message,
        }
    }
}

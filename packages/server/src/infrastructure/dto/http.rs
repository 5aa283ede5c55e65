//! HTTP API request/response DTOs for the messaging engine.

use serde::{Deserialize, Serialize};
use tsunagu_shared::time::unix_millis_to_rfc3339;

use crate::{domain::Message, usecase::InboxEntry};

/// Send-message request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

/// A persisted message, as returned by the API and pushed over WebSocket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub message: String,
    /// Unix timestamp (milliseconds since epoch, UTC)
    pub created_at: i64,
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.as_str().to_string(),
            conversation_id: message.conversation_id.as_str().to_string(),
            sender_id: message.sender_id.as_str().to_string(),
            recipient_id: message.recipient_id.as_str().to_string(),
            message: message.body.as_str().to_string(),
            created_at: message.created_at.value(),
        }
    }
}

/// One inbox row: a conversation with its preview data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxEntryDto {
    pub conversation_id: String,
    pub other_participant: String,
    pub last_message: Option<MessageDto>,
    pub created_at: String,       // ISO 8601
    pub last_activity_at: String, // ISO 8601
}

impl From<&InboxEntry> for InboxEntryDto {
    fn from(entry: &InboxEntry) -> Self {
        Self {
            conversation_id: entry.conversation.id.as_str().to_string(),
            other_participant: entry.other_participant.as_str().to_string(),
            last_message: entry.last_message.as_ref().map(MessageDto::from),
            created_at: unix_millis_to_rfc3339(entry.conversation.created_at.value()),
            last_activity_at: unix_millis_to_rfc3339(entry.conversation.last_activity_at.value()),
        }
    }
}

//! Core domain models for the messaging engine.

use serde::{Deserialize, Serialize};

use super::value_object::{ConversationId, MessageBody, MessageId, ParticipantPair, Timestamp, UserId};

/// The unique thread of messages between exactly two participants.
///
/// A conversation is created lazily on first send between a pair and is never
/// deleted. For any unordered pair of users at most one conversation exists;
/// the repository enforces this through the pair's canonical key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation identifier
    pub id: ConversationId,
    /// The two participants, in canonical order
    pub participants: ParticipantPair,
    /// Message identifiers in append order (insertion order = chronological)
    pub message_ids: Vec<MessageId>,
    /// Timestamp when the conversation was created
    pub created_at: Timestamp,
    /// Timestamp of the most recent appended message
    pub last_activity_at: Timestamp,
}

impl Conversation {
    /// Create a new empty conversation between the given pair.
    pub fn new(id: ConversationId, participants: ParticipantPair, created_at: Timestamp) -> Self {
        Self {
            id,
            participants,
            message_ids: Vec::new(),
            created_at,
            last_activity_at: created_at,
        }
    }

    /// Record an appended message: extends the message sequence and advances
    /// the last-activity timestamp.
    pub fn record_message(&mut self, message_id: MessageId, at: Timestamp) {
        self.message_ids.push(message_id);
        self.last_activity_at = at;
    }

    /// The participant that is not `user_id`, if `user_id` takes part.
    pub fn other_participant(&self, user_id: &UserId) -> Option<&UserId> {
        self.participants.other(user_id)
    }
}

/// A persisted message.
///
/// Immutable after creation; belongs to exactly one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier
    pub id: MessageId,
    /// The conversation this message belongs to
    pub conversation_id: ConversationId,
    /// Sender's user id
    pub sender_id: UserId,
    /// Recipient's user id
    pub recipient_id: UserId,
    /// Message text
    pub body: MessageBody,
    /// Timestamp assigned by the store on append
    pub created_at: Timestamp,
}

impl Message {
    /// Create a new message record.
    pub fn new(
        id: MessageId,
        conversation_id: ConversationId,
        sender_id: UserId,
        recipient_id: UserId,
        body: MessageBody,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender_id,
            recipient_id,
            body,
            created_at,
        }
    }
}

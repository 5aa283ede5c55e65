//! Domain factories for creating domain entities and value objects.

use super::{
    error::ValueObjectError,
    value_object::{ConversationId, MessageId},
};

/// Factory for generating ConversationId instances.
///
/// This factory encapsulates the logic for generating new conversation
/// identifiers, separating the generation concern from the validation logic
/// in ConversationId.
pub struct ConversationIdFactory;

impl ConversationIdFactory {
    /// Generate a new ConversationId with a random UUID v4.
    ///
    /// # Errors
    ///
    /// This method should not fail in practice, but returns Result for
    /// consistency with the domain error handling pattern.
    pub fn generate() -> Result<ConversationId, ValueObjectError> {
        let uuid = uuid::Uuid::new_v4();
        ConversationId::new(uuid.to_string())
    }
}

/// Factory for generating MessageId instances.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new MessageId with a random UUID v4.
    pub fn generate() -> Result<MessageId, ValueObjectError> {
        let uuid = uuid::Uuid::new_v4();
        MessageId::new(uuid.to_string())
    }
}

//! Repository trait for conversation and message persistence.
//!
//! The UseCase layer depends on this trait, not on a concrete store
//! (dependency inversion). Implementations must make `create` atomic with
//! respect to the canonical-pair uniqueness constraint: concurrent creates
//! for the same pair must leave exactly one conversation, with the loser
//! seeing `RepositoryError::DuplicateConversation`.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use super::{
    entity::{Conversation, Message},
    value_object::{ConversationId, MessageBody, ParticipantPair, UserId},
};

/// Errors raised by the persistence layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A conversation for the same canonical participant pair already exists
    #[error("conversation for pair '{0}' already exists")]
    DuplicateConversation(String),

    /// No conversation with the given identifier
    #[error("conversation '{0}' not found")]
    ConversationNotFound(String),

    /// The underlying store failed
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Durable store of conversations and their append-only message logs.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Look up the conversation for a canonical participant pair.
    async fn find_by_participants(
        &self,
        pair: &ParticipantPair,
    ) -> Result<Option<Conversation>, RepositoryError>;

    /// Insert a new conversation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DuplicateConversation` when a conversation
    /// for the same pair already exists. Callers resolving a pair treat that
    /// as "lost the creation race" and re-fetch.
    async fn create(&self, conversation: Conversation) -> Result<Conversation, RepositoryError>;

    /// All conversations the given user takes part in (unsorted).
    async fn conversations_for(&self, user_id: &UserId)
    -> Result<Vec<Conversation>, RepositoryError>;

    /// Append a message to a conversation.
    ///
    /// The store assigns the message identifier and a creation timestamp that
    /// is strictly increasing within the conversation, and atomically extends
    /// the conversation's message sequence and last-activity timestamp.
    async fn append_message(
        &self,
        conversation_id: &ConversationId,
        sender_id: UserId,
        recipient_id: UserId,
        body: MessageBody,
    ) -> Result<Message, RepositoryError>;

    /// The conversation's messages in append order. A fresh read each call;
    /// no cursor state is retained.
    async fn history(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, RepositoryError>;

    /// The most recent message of the conversation, if any.
    async fn last_message(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<Message>, RepositoryError>;
}

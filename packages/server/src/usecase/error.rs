//! UseCase layer error definitions.

use thiserror::Error;

/// Errors from resolving the conversation between two participants
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Both identifiers name the same user
    #[error("cannot open a conversation with yourself")]
    SelfConversation,

    /// An identifier does not resolve to a registered user
    #[error("unknown user '{0}'")]
    UnknownUser(String),

    /// The persistence layer failed
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Errors from sending a message
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// Self-messaging or an unknown participant
    #[error("invalid participants: {0}")]
    InvalidParticipants(String),

    /// The message body failed validation
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// The persistence layer failed; nothing was sent
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<ResolveError> for SendMessageError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::SelfConversation | ResolveError::UnknownUser(_) => {
                SendMessageError::InvalidParticipants(err.to_string())
            }
            ResolveError::Storage(message) => SendMessageError::Storage(message),
        }
    }
}

/// Errors from reading a conversation history
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// Both identifiers name the same user
    #[error("invalid participants: {0}")]
    InvalidParticipants(String),

    /// The persistence layer failed
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Errors from listing a user's inbox
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InboxError {
    /// The persistence layer failed
    #[error("storage failure: {0}")]
    Storage(String),
}

use thiserror::Error;

/// Errors surfaced by the conversation store. There is exactly one failure
/// mode: an operation named a conversation that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("unknown conversation: {0}")]
    ConversationNotFound(String),
}

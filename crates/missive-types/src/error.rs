use thiserror::Error;

/// Errors from message operations.
///
/// Delivery-channel failures are deliberately absent: push and publish
/// problems are logged by the message service and never surfaced.
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("message not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for MessageError {
    fn from(err: StoreError) -> Self {
        MessageError::Storage(err.to_string())
    }
}

/// Errors from message store operations (used by trait definitions in
/// missive-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from push delivery attempts.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("no mailbox registered for user '{0}'")]
    NotRegistered(String),

    #[error("mailbox full for user '{0}'")]
    MailboxFull(String),

    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Errors from event publication attempts.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("publish failed: {0}")]
    Failed(String),
}

/// Errors from block-relation operations.
#[derive(Debug, Error)]
pub enum BlockError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for BlockError {
    fn from(err: StoreError) -> Self {
        BlockError::Storage(err.to_string())
    }
}

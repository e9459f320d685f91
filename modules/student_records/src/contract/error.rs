use std::fmt;
use thiserror::Error;

/// Which store call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// Record store failures. Transport errors, non-success statuses and
/// undecodable bodies are deliberately not told apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("remote operation failed ({operation}): {reason}")]
    RemoteFailed {
        operation: StoreOperation,
        reason: String,
    },
}

impl StoreError {
    pub fn remote(operation: StoreOperation, reason: impl Into<String>) -> Self {
        Self::RemoteFailed {
            operation,
            reason: reason.into(),
        }
    }

    pub fn operation(&self) -> StoreOperation {
        match self {
            Self::RemoteFailed { operation, .. } => *operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failure_message_names_operation() {
        let err = StoreError::remote(StoreOperation::Update, "HTTP 500 Internal Server Error");
        assert_eq!(err.operation(), StoreOperation::Update);
        assert_eq!(
            err.to_string(),
            "remote operation failed (update): HTTP 500 Internal Server Error"
        );
    }
}

//! Error taxonomy for directory lookups.

use thiserror::Error;

/// Failure from either directory operation.
///
/// Both variants are user-visible and retryable. Stale-response discards are
/// not errors and never surface through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The directory answered with a non-success status code.
    #[error("directory returned status {0}")]
    Status(u16),

    /// The request never completed (connection, timeout, decode).
    #[error("transport failure: {0}")]
    Transport(String),
}

impl DirectoryError {
    /// Whether this failure came back with an HTTP status.
    #[must_use]
    pub const fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_code() {
        let err = DirectoryError::Status(403);
        assert_eq!(err.to_string(), "directory returned status 403");
    }

    #[test]
    fn display_includes_transport_detail() {
        let err = DirectoryError::Transport("connection refused".into());
        assert!(err.to_string().contains("connection refused"));
    }
}

/// Errors raised by the remote product API adapter.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    /// The server answered with a non-success status.
    /// `message` carries the `msg` field of the error body when it has one.
    #[error("repository.rejected")]
    Rejected { status: u16, message: Option<String> },
    #[error("repository.unreachable")]
    Unreachable,
    #[error("repository.invalid_response")]
    InvalidResponse,
}

impl RepositoryError {
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        RepositoryError::Rejected { status, message }
    }
    pub fn unreachable() -> Self {
        RepositoryError::Unreachable
    }
    pub fn invalid_response() -> Self {
        RepositoryError::InvalidResponse
    }

    /// Message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RepositoryError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProductError {
    #[error("product.invalid_id")]
    InvalidId,
    #[error("repository.error")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}

impl ProductError {
    /// Message supplied by the server, if the failure came with one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ProductError::Repository(e) => e.server_message(),
            ProductError::InvalidId => None,
        }
    }
}

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

use super::model::{DeletionReceipt, Product};
use super::value_objects::ProductId;

/// Remote product API.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_by_id(&self, id: &ProductId) -> Result<Product, RepositoryError>;
    async fn delete(&self, id: &ProductId) -> Result<DeletionReceipt, RepositoryError>;
}

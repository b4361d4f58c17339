use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::DeletionReceipt;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};

pub struct DeleteProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteProductUseCase for DeleteProductUseCaseImpl {
    async fn execute(&self, params: DeleteProductParams) -> Result<DeletionReceipt, ProductError> {
        self.logger
            .info(&format!("Deleting product: {}", params.id));

        match self.repository.delete(&params.id).await {
            Ok(receipt) => {
                self.logger.info(&format!("Product deleted: {}", params.id));
                Ok(receipt)
            }
            Err(e) => {
                self.logger
                    .error(&format!("Deletion of product {} failed: {}", params.id, e));
                Err(e.into())
            }
        }
    }
}

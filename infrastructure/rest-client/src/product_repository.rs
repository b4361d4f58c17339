use async_trait::async_trait;
use reqwest::Response;

use business::domain::errors::RepositoryError;
use business::domain::product::model::{DeletionReceipt, Product};
use business::domain::product::repository::ProductRepository;
use business::domain::product::value_objects::ProductId;

use crate::client::ApiClient;
use crate::dto::{MessageResponse, ProductLookupResponse};

pub struct ProductRepositoryHttp {
    client: ApiClient,
}

impl ProductRepositoryHttp {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

/// Passes 2xx responses through; turns anything else into `Rejected`
/// carrying the body's `msg`, if it has one.
async fn ensure_success(response: Response) -> Result<Response, RepositoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .bytes()
        .await
        .ok()
        .and_then(|body| MessageResponse::parse(&body).msg);

    Err(RepositoryError::rejected(status.as_u16(), message))
}

#[async_trait]
impl ProductRepository for ProductRepositoryHttp {
    async fn get_by_id(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        let response = self
            .client
            .client
            .get(self.client.lookup_url(id))
            .send()
            .await
            .map_err(|_| RepositoryError::Unreachable)?;

        let body: ProductLookupResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|_| RepositoryError::InvalidResponse)?;

        body.into_domain()
    }

    async fn delete(&self, id: &ProductId) -> Result<DeletionReceipt, RepositoryError> {
        let response = self
            .client
            .client
            .delete(self.client.delete_url(id))
            .send()
            .await
            .map_err(|_| RepositoryError::Unreachable)?;

        let body = ensure_success(response)
            .await?
            .bytes()
            .await
            .map_err(|_| RepositoryError::Unreachable)?;

        Ok(MessageResponse::parse(&body).into_receipt())
    }
}

use std::time::Duration;

use reqwest::Client;
use url::Url;

use business::domain::product::value_objects::ProductId;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("client.invalid_base_url")]
    InvalidBaseUrl,
    #[error("client.build_failed")]
    BuildFailed,
}

/// Shared HTTP client configured for the product API.
pub struct ApiClient {
    pub client: Client,
    pub base_url: Url,
}

impl ApiClient {
    /// Builds a client for an absolute `http`/`https` base URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl)?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|_| ClientError::BuildFailed)?;

        Ok(Self { client, base_url })
    }

    /// Returns the lookup endpoint URL for a product.
    pub fn lookup_url(&self, id: &ProductId) -> String {
        format!("{}/consultar/{}", self.base(), id)
    }

    /// Returns the delete endpoint URL for a product.
    pub fn delete_url(&self, id: &ProductId) -> String {
        format!("{}/eliminar/{}", self.base(), id)
    }

    fn base(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ProductId {
        ProductId::parse(raw).unwrap()
    }

    #[test]
    fn should_build_endpoint_urls() {
        let client = ApiClient::new("http://localhost:4000/api", Duration::from_secs(5)).unwrap();

        assert_eq!(
            client.lookup_url(&id("7")),
            "http://localhost:4000/api/consultar/7"
        );
        assert_eq!(
            client.delete_url(&id("7")),
            "http://localhost:4000/api/eliminar/7"
        );
    }

    #[test]
    fn should_tolerate_trailing_slash() {
        let client = ApiClient::new("https://example.com/", Duration::from_secs(5)).unwrap();

        assert_eq!(
            client.lookup_url(&id("012")),
            "https://example.com/consultar/012"
        );
    }

    #[test]
    fn should_reject_relative_or_unsupported_urls() {
        assert!(matches!(
            ApiClient::new("/api", Duration::from_secs(5)),
            Err(ClientError::InvalidBaseUrl)
        ));
        assert!(matches!(
            ApiClient::new("ftp://example.com", Duration::from_secs(5)),
            Err(ClientError::InvalidBaseUrl)
        ));
    }
}

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

use business::domain::errors::RepositoryError;
use business::domain::product::model::{DeletionReceipt, Product};
use business::domain::product::value_objects::ProductId;

/// Body of a successful `GET /consultar/{id}`.
#[derive(Debug, Deserialize)]
pub struct ProductLookupResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub idproducto: String,
    pub nombre: String,
}

impl ProductLookupResponse {
    pub fn into_domain(self) -> Result<Product, RepositoryError> {
        let id = ProductId::parse(&self.idproducto).map_err(|_| RepositoryError::InvalidResponse)?;
        Ok(Product::new(id, self.nombre))
    }
}

/// `{ msg }` body sent with delete results and with errors.
#[derive(Debug, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub msg: Option<String>,
}

impl MessageResponse {
    /// Decodes a body leniently: anything unreadable is a body without message.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn into_receipt(self) -> DeletionReceipt {
        DeletionReceipt { message: self.msg }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "unexpected idproducto: {}",
            other
        ))),
    }
}

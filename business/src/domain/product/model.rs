use serde::{Deserialize, Serialize};

use super::value_objects::ProductId;

/// A product as returned by a successful lookup.
///
/// Only ever held as a transient view value; nothing is persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Outcome of a successful delete call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeletionReceipt {
    pub message: Option<String>,
}

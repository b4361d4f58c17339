use serde::{Deserialize, Serialize};

use crate::domain::product::errors::ProductError;

/// Shown when a request fails and the server did not say why.
pub const REQUEST_FAILED_MESSAGE: &str = "Error en la solicitud: contactar al administrador";

/// Shown when a delete succeeds and the server did not send a message.
pub const PRODUCT_DELETED_MESSAGE: &str = "Producto Eliminado";

/// Outcome of the most recent search or delete attempt, as shown to the operator.
///
/// `succeeded` is `true` only when the operation it reports went through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub succeeded: bool,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            succeeded: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            succeeded: false,
        }
    }

    /// Failure notification carrying the server message, or the generic fallback.
    pub fn from_error(error: &ProductError) -> Self {
        let message = error
            .server_message()
            .filter(|m| !m.is_empty())
            .unwrap_or(REQUEST_FAILED_MESSAGE);
        Self::failure(message)
    }
}

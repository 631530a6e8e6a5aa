use crate::actor_framework::FrameworkError;
use crate::domain::ProductId;
use crate::product_actor::ProductError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("{product_id} is not in cart {owner}")]
    LineNotFound { owner: String, product_id: ProductId },
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Catalog error: {0}")]
    Catalog(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CartError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<ProductError> for CartError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => CartError::NotFound(id),
            ProductError::ActorCommunicationError(msg) => CartError::ActorCommunicationError(msg),
            other => CartError::Catalog(other.to_string()),
        }
    }
}

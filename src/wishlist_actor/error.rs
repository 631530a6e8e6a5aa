use crate::actor_framework::FrameworkError;
use crate::domain::{ProductId, UserId};
use crate::product_actor::ProductError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WishlistError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("{product_id} is already on the wishlist of {owner}")]
    AlreadyListed { owner: UserId, product_id: ProductId },
    #[error("Catalog error: {0}")]
    Catalog(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for WishlistError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => WishlistError::NotFound(id),
            other => WishlistError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<ProductError> for WishlistError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => WishlistError::NotFound(id),
            ProductError::ActorCommunicationError(msg) => WishlistError::ActorCommunicationError(msg),
            other => WishlistError::Catalog(other.to_string()),
        }
    }
}

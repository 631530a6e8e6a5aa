use crate::actor_framework::FrameworkError;
use crate::domain::{Money, ProductId};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
    #[error("Invalid price: {0}")]
    InvalidPrice(Money),
    #[error("Invalid discount rate: {0}% (expected 1 to 99)")]
    InvalidDiscount(u8),
    #[error("Invalid rating aggregate: sum {sum} over {count} ratings")]
    InvalidRatingAggregate { sum: u64, count: u64 },
    #[error("Not authorized: {0}")]
    Unauthorized(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

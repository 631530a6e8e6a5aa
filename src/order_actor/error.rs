use crate::actor_framework::FrameworkError;
use crate::cart_actor::CartError;
use crate::domain::{OrderLine, OrderStatus, ProductId};
use crate::payment_actor::PaymentError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Cart is empty: {0}")]
    EmptyCart(String),
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
    #[error("Payment failed: {0}")]
    PaymentFailed(String),
    #[error("Invalid order status transition from {from} to {to}")]
    InvalidStateTransition { from: OrderStatus, to: OrderStatus },
    #[error("Not authorized: {0}")]
    Unauthorized(String),
    #[error("Order is immutable: {0}")]
    Immutable(String),
    #[error("Invalid date range: {from} to {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },
    #[error("Revenue for {0} does not fit in a money amount")]
    RevenueOverflow(NaiveDate),
    #[error("Collaborator error: {0}")]
    Collaborator(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    /// The order's total does not fit in `Money`; reports the unit count.
    pub(crate) fn total_overflow(lines: &[OrderLine]) -> Self {
        OrderError::InvalidQuantity(lines.iter().map(|line| i64::from(line.quantity)).sum())
    }
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<ProductError> for OrderError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => OrderError::NotFound(id),
            ProductError::InsufficientStock { product_id, requested, available } => {
                OrderError::InsufficientStock { product_id, requested, available }
            }
            ProductError::InvalidQuantity(quantity) => OrderError::InvalidQuantity(quantity),
            ProductError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
            other => OrderError::Collaborator(other.to_string()),
        }
    }
}

impl From<CartError> for OrderError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::NotFound(id) => OrderError::NotFound(id),
            CartError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
            other => OrderError::Collaborator(other.to_string()),
        }
    }
}

impl From<UserError> for OrderError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(id) => OrderError::NotFound(id),
            UserError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
            other => OrderError::Collaborator(other.to_string()),
        }
    }
}

impl From<PaymentError> for OrderError {
    fn from(e: PaymentError) -> Self {
        OrderError::PaymentFailed(e.to_string())
    }
}

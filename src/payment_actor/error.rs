use crate::actor_framework::FrameworkError;
use crate::domain::{Money, PaymentMethod};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    #[error("Payment not found: {0}")]
    NotFound(String),
    #[error("Payment of {amount} by {method} was declined")]
    Declined { amount: Money, method: PaymentMethod },
    #[error("Payment is immutable: {0}")]
    Immutable(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for PaymentError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => PaymentError::NotFound(id),
            other => PaymentError::ActorCommunicationError(other.to_string()),
        }
    }
}

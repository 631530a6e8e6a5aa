use crate::actor_framework::FrameworkError;
use crate::domain::{ReviewId, ReviewStatus};
use crate::product_actor::ProductError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid rating: {0} (expected 1 to 5)")]
    InvalidRating(i32),
    #[error("Invalid review status transition from {from} to {to}")]
    InvalidStateTransition { from: ReviewStatus, to: ReviewStatus },
    #[error("Not authorized: {0}")]
    Unauthorized(String),
    #[error("{review_id} is approved but its rating is not counted: {cause}")]
    ApprovalUnrecorded { review_id: ReviewId, cause: String },
    #[error("Catalog error: {0}")]
    Catalog(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ReviewError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ReviewError::NotFound(id),
            other => ReviewError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<ProductError> for ReviewError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => ReviewError::NotFound(id),
            ProductError::Unauthorized(msg) => ReviewError::Unauthorized(msg),
            ProductError::ActorCommunicationError(msg) => ReviewError::ActorCommunicationError(msg),
            other => ReviewError::Catalog(other.to_string()),
        }
    }
}

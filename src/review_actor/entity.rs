use super::actions::ReviewAction;
use super::error::ReviewError;
use crate::actor_framework::Entity;
use crate::domain::{Review, ReviewCreate, ReviewId, ReviewStatus};
use chrono::Utc;

impl Entity for Review {
    type Id = ReviewId;
    type CreateParams = ReviewCreate;
    type UpdateParams = ();
    type Action = ReviewAction;
    type ActionResult = Review;
    type Error = ReviewError;

    fn id(&self) -> &ReviewId {
        &self.id
    }

    /// Every review starts out Pending.
    fn from_create_params(id: ReviewId, params: ReviewCreate) -> Result<Self, ReviewError> {
        Ok(Self {
            id,
            product_id: params.product_id,
            author_id: params.author_id,
            rating: params.rating,
            content: params.content,
            status: ReviewStatus::Pending,
            created_at: Utc::now(),
            moderated_at: None,
        })
    }

    fn on_update(&mut self, _update: ()) -> Result<(), ReviewError> {
        Ok(())
    }

    /// Applies a moderation decision and returns the review as stored.
    ///
    /// # Errors
    /// `InvalidStateTransition` unless the review is in the expected source state.
    fn handle_action(&mut self, action: ReviewAction) -> Result<Review, ReviewError> {
        let (from, to) = match action {
            ReviewAction::Approve => (ReviewStatus::Pending, ReviewStatus::Approved),
            ReviewAction::Reject => (ReviewStatus::Pending, ReviewStatus::Rejected),
            ReviewAction::RevertApproval => (ReviewStatus::Approved, ReviewStatus::Pending),
        };
        if self.status != from {
            return Err(ReviewError::InvalidStateTransition { from: self.status, to });
        }
        self.status = to;
        self.moderated_at = match to {
            ReviewStatus::Pending => None,
            _ => Some(Utc::now()),
        };
        Ok(self.clone())
    }
}

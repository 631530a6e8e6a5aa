use crate::actor_framework::ResourceClient;
use crate::clients::ProductClient;
use crate::domain::{Capabilities, ProductId, Rating, RatingAggregate, Review, ReviewCreate, ReviewId, ReviewStatus, User, UserId};
use crate::review_actor::{ReviewAction, ReviewError};
use tracing::{debug, error, info, instrument, warn};

/// Client for review moderation and the product rating aggregate it feeds.
#[derive(Clone)]
pub struct ReviewClient {
    inner: ResourceClient<Review>,
    product_client: ProductClient,
}

impl_client_methods!(ReviewClient, Review, ReviewId, ReviewError, review);

impl ReviewClient {
    pub fn new(inner: ResourceClient<Review>, product_client: ProductClient) -> Self {
        Self { inner, product_client }
    }

    /// Stores a `Pending` review.
    ///
    /// # Errors
    /// `InvalidRating` outside 1..=5; `NotFound` for an unknown product.
    #[instrument(skip(self, content))]
    pub async fn submit(
        &self,
        product_id: ProductId,
        author_id: UserId,
        rating: i32,
        content: impl Into<String>,
    ) -> Result<ReviewId, ReviewError> {
        let rating = Rating::new(rating).ok_or(ReviewError::InvalidRating(rating))?;
        self.product_client.require_product(product_id).await?;
        let params = ReviewCreate {
            product_id,
            author_id,
            rating,
            content: content.into(),
        };
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(review_id = %id, "Review submitted");
        Ok(id)
    }

    /// Approves a pending review and folds its rating into the product.
    ///
    /// The review is marked `Approved` first and the rating applied second, so
    /// for a moment a reader can see the approval before the aggregate moves.
    /// If the product cannot take the rating the review goes back to
    /// `Pending` and the catalog error is returned.
    ///
    /// # Errors
    /// `ApprovalUnrecorded` when that revert fails too: the review stays
    /// `Approved` without its rating and needs `correct_rating` or a retry.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn approve(&self, actor: &User, id: ReviewId) -> Result<RatingAggregate, ReviewError> {
        ensure_moderator(actor)?;
        debug!("Sending request");
        let review = self.inner.perform_action(id, ReviewAction::Approve).await?;

        match self.product_client.apply_rating(review.product_id, review.rating).await {
            Ok(aggregate) => {
                info!(
                    product_id = %review.product_id,
                    average = aggregate.average,
                    count = aggregate.count,
                    "Review approved"
                );
                Ok(aggregate)
            }
            Err(e) => {
                error!(error = %e, "Rating update failed; reverting approval");
                if let Err(revert) = self.inner.perform_action(id, ReviewAction::RevertApproval).await {
                    error!(error = %revert, "Approval could not be reverted");
                    return Err(ReviewError::ApprovalUnrecorded {
                        review_id: id,
                        cause: e.to_string(),
                    });
                }
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn reject(&self, actor: &User, id: ReviewId) -> Result<Review, ReviewError> {
        ensure_moderator(actor)?;
        debug!("Sending request");
        let review = self.inner.perform_action(id, ReviewAction::Reject).await?;
        info!("Review rejected");
        Ok(review)
    }

    /// Reviews of one product, optionally narrowed to a status, oldest first.
    #[instrument(skip(self))]
    pub async fn reviews_for_product(
        &self,
        product_id: ProductId,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<Review>, ReviewError> {
        debug!("Sending request");
        self.inner
            .query(move |review| {
                review.product_id == product_id && status.map_or(true, |status| review.status == status)
            })
            .await
    }

    /// Overwrites a product's rating aggregate, bypassing moderation.
    ///
    /// # Errors
    /// `Catalog` when the sum is not achievable with `count` ratings of 1..=5.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn correct_rating(
        &self,
        actor: &User,
        product_id: ProductId,
        sum: u64,
        count: u64,
    ) -> Result<RatingAggregate, ReviewError> {
        ensure_moderator(actor)?;
        let aggregate = self.product_client.set_rating_aggregate(product_id, sum, count).await?;
        warn!(average = aggregate.average, count, "Rating aggregate overwritten");
        Ok(aggregate)
    }
}

fn ensure_moderator(actor: &User) -> Result<(), ReviewError> {
    if actor.can_moderate_reviews() {
        Ok(())
    } else {
        warn!(actor_id = %actor.id, "Moderation refused");
        Err(ReviewError::Unauthorized(format!("{} cannot moderate reviews", actor.id)))
    }
}

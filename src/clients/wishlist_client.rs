use crate::actor_framework::ResourceClient;
use crate::clients::{DiscountNotifier, ProductClient};
use crate::domain::{Product, ProductId, UserId, Wishlist};
use crate::wishlist_actor::{WishlistAction, WishlistError};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Client for the wishlist store and the sale announcements that go with it.
#[derive(Clone)]
pub struct WishlistClient {
    inner: ResourceClient<Wishlist>,
    product_client: ProductClient,
    notifier: Arc<dyn DiscountNotifier>,
}

impl WishlistClient {
    pub fn new(inner: ResourceClient<Wishlist>, product_client: ProductClient, notifier: Arc<dyn DiscountNotifier>) -> Self {
        Self {
            inner,
            product_client,
            notifier,
        }
    }

    /// The user's wishlist, or an empty one if they have none yet.
    #[instrument(skip(self))]
    pub async fn get_wishlist(&self, user_id: UserId) -> Result<Wishlist, WishlistError> {
        debug!("Sending request");
        let wishlist = self.inner.get(user_id).await?;
        Ok(wishlist.unwrap_or_else(|| Wishlist::empty(user_id)))
    }

    /// # Errors
    /// - `NotFound` for a product that is not in the catalog
    /// - `AlreadyListed` when the product is on the wishlist already
    #[instrument(skip(self))]
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> Result<Wishlist, WishlistError> {
        self.product_client.require_product(product_id).await?;
        debug!("Sending request");
        let wishlist = self
            .inner
            .upsert_action(user_id, (), WishlistAction::Add(product_id))
            .await?;
        info!(products = wishlist.products.len(), "Added to wishlist");
        Ok(wishlist)
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: UserId, product_id: ProductId) -> Result<Wishlist, WishlistError> {
        debug!("Sending request");
        self.inner.perform_action(user_id, WishlistAction::Remove(product_id)).await
    }

    /// Empties the wishlist. Clearing a wishlist that does not exist is a no-op.
    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: UserId) -> Result<(), WishlistError> {
        debug!("Sending request");
        match self.inner.perform_action(user_id, WishlistAction::Clear).await {
            Ok(_) | Err(WishlistError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Every wishlist listing at least one of `ids`.
    #[instrument(skip(self))]
    pub async fn watchers(&self, ids: Vec<ProductId>) -> Result<Vec<Wishlist>, WishlistError> {
        debug!("Sending request");
        self.inner
            .query(move |wishlist| ids.iter().any(|id| wishlist.contains(*id)))
            .await
    }

    /// Tells every watcher of a discounted product about it, once per listed product.
    ///
    /// Returns how many announcements went out. Delivery failures are logged
    /// and skipped; they never undo the discount.
    #[instrument(skip(self, products), fields(products = products.len()))]
    pub async fn announce_discount(&self, products: &[Product]) -> Result<usize, WishlistError> {
        let ids: Vec<ProductId> = products.iter().map(|product| product.id).collect();
        let watchers = self.watchers(ids.clone()).await?;
        let mut sent = 0;
        for wishlist in &watchers {
            for product_id in wishlist.watching(&ids) {
                let Some(product) = products.iter().find(|product| product.id == product_id) else {
                    continue;
                };
                match self.notifier.discount_available(wishlist.owner, product).await {
                    Ok(()) => sent += 1,
                    Err(e) => warn!(error = %e, user_id = %wishlist.owner, "Discount notification failed"),
                }
            }
        }
        info!(watchers = watchers.len(), sent, "Discount announced");
        Ok(sent)
    }
}

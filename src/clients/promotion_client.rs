use crate::clients::{ProductClient, WishlistClient};
use crate::domain::{Product, ProductId, User};
use crate::product_actor::ProductError;
use tracing::{info, instrument, warn};

/// Runs sales: reprices the catalog, then tells wishlist owners.
#[derive(Clone)]
pub struct PromotionClient {
    product_client: ProductClient,
    wishlist_client: WishlistClient,
}

impl PromotionClient {
    pub fn new(product_client: ProductClient, wishlist_client: WishlistClient) -> Self {
        Self {
            product_client,
            wishlist_client,
        }
    }

    /// Discounts every listed product by `rate` percent and announces it.
    ///
    /// The catalog change is all-or-nothing; see
    /// [`ProductClient::apply_discount`]. An announcement failure is logged
    /// and the discount stays.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn apply_discount(&self, actor: &User, ids: &[ProductId], rate: u8) -> Result<Vec<Product>, ProductError> {
        let products = self.product_client.apply_discount(actor, ids, rate).await?;
        match self.wishlist_client.announce_discount(&products).await {
            Ok(sent) => info!(sent, "Sale started"),
            Err(e) => warn!(error = %e, "Sale started without announcements"),
        }
        Ok(products)
    }

    pub async fn remove_discount(&self, actor: &User, ids: &[ProductId]) -> Result<Vec<Product>, ProductError> {
        self.product_client.remove_discount(actor, ids).await
    }
}

use crate::actor_framework::ResourceClient;
use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::clients::ProductClient;
use crate::domain::{Cart, CartLine, CartOwner, Money, ProductId, SessionToken, UserId};
use tracing::{debug, info, instrument, warn};

/// Client for the cart store.
///
/// Every mutation of one owner's cart is a single action on the cart actor,
/// so concurrent edits to the same cart serialize.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    product_client: ProductClient,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>, product_client: ProductClient) -> Self {
        Self { inner, product_client }
    }

    /// The owner's cart, or an empty one if they have none yet.
    #[instrument(skip(self))]
    pub async fn get_cart(&self, owner: CartOwner) -> Result<Cart, CartError> {
        debug!("Sending request");
        let cart = self.inner.get(owner.clone()).await?;
        Ok(cart.unwrap_or_else(|| Cart::empty(owner)))
    }

    /// Adds `quantity` units, merging with an existing line for the product.
    ///
    /// The current catalog price is copied for display; nothing is reserved.
    #[instrument(skip(self))]
    pub async fn add_line(&self, owner: CartOwner, product_id: ProductId, quantity: u32) -> Result<Cart, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }
        let product = self.product_client.require_product(product_id).await?;
        let line = CartLine {
            product_id,
            quantity,
            unit_price_snapshot: product.price,
        };
        debug!("Sending request");
        let cart = updated(self.inner.upsert_action(owner, (), CartAction::AddLine(line)).await?)?;
        info!(lines = cart.lines.len(), "Cart line added");
        Ok(cart)
    }

    #[instrument(skip(self))]
    pub async fn remove_line(&self, owner: CartOwner, product_id: ProductId) -> Result<Cart, CartError> {
        debug!("Sending request");
        updated(self.inner.perform_action(owner, CartAction::RemoveLine(product_id)).await?)
    }

    /// Replaces a line's quantity. Zero removes the line.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, owner: CartOwner, product_id: ProductId, quantity: u32) -> Result<Cart, CartError> {
        debug!("Sending request");
        let action = CartAction::SetQuantity { product_id, quantity };
        updated(self.inner.perform_action(owner, action).await?)
    }

    /// Destroys the cart. Clearing a cart that does not exist is a no-op.
    #[instrument(skip(self))]
    pub async fn clear(&self, owner: CartOwner) -> Result<(), CartError> {
        debug!("Sending request");
        match self.inner.delete(owner).await {
            Ok(()) | Err(CartError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Live total: current catalog prices times quantities, not the snapshots.
    #[instrument(skip(self))]
    pub async fn total(&self, owner: CartOwner) -> Result<Money, CartError> {
        let cart = self.get_cart(owner).await?;
        if cart.is_empty() {
            return Ok(Money::ZERO);
        }
        let ids = cart.lines.iter().map(|line| line.product_id).collect();
        let prices = self.product_client.prices(ids).await?;
        cart.lines.iter().try_fold(Money::ZERO, |total, line| {
            let price = prices.get(&line.product_id).copied().unwrap_or_default();
            price
                .checked_times(line.quantity)
                .and_then(|line_total| total.checked_add(line_total))
                .ok_or(CartError::InvalidQuantity(line.quantity))
        })
    }

    /// Moves an anonymous session cart into the user's cart on login.
    ///
    /// Quantities of shared products add up. The session cart is left in
    /// place, emptied, so lines added to it during the merge are kept for the
    /// next one. If the user's cart cannot take the lines they are put back.
    #[instrument(skip(self))]
    pub async fn merge_session_cart(&self, session: SessionToken, user_id: UserId) -> Result<Cart, CartError> {
        let session_owner = CartOwner::from(session);
        let user_owner = CartOwner::from(user_id);

        debug!("Sending request");
        let lines = match self.inner.perform_action(session_owner.clone(), CartAction::Drain).await {
            Ok(CartActionResult::Drained(lines)) => lines,
            Ok(CartActionResult::Updated(_)) => {
                return Err(CartError::ActorCommunicationError("Unexpected result".to_string()));
            }
            Err(CartError::NotFound(_)) => {
                debug!("No session cart to merge");
                return self.get_cart(user_owner).await;
            }
            Err(e) => return Err(e),
        };

        let merged = if lines.is_empty() {
            self.get_cart(user_owner).await?
        } else {
            let merge = CartAction::Merge(lines.clone());
            match self.inner.upsert_action(user_owner, (), merge).await {
                Ok(result) => updated(result)?,
                Err(e) => {
                    warn!(error = %e, "Merge failed; restoring session cart");
                    self.inner
                        .perform_action(session_owner, CartAction::Merge(lines))
                        .await?;
                    return Err(e);
                }
            }
        };

        info!(lines = merged.lines.len(), "Session cart merged");
        Ok(merged)
    }

    /// Takes just-ordered quantities off the cart, keeping lines added since the snapshot.
    #[instrument(skip(self))]
    pub(crate) async fn remove_checked_out(&self, owner: CartOwner, ordered: Vec<(ProductId, u32)>) -> Result<(), CartError> {
        debug!("Sending request");
        match self.inner.perform_action(owner, CartAction::RemoveCheckedOut(ordered)).await {
            Ok(_) | Err(CartError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

fn updated(result: CartActionResult) -> Result<Cart, CartError> {
    match result {
        CartActionResult::Updated(cart) => Ok(cart),
        CartActionResult::Drained(_) => Err(CartError::ActorCommunicationError("Unexpected result".to_string())),
    }
}

use super::actions::WishlistAction;
use super::error::WishlistError;
use crate::actor_framework::Entity;
use crate::domain::{UserId, Wishlist};
use chrono::Utc;

impl Entity for Wishlist {
    type Id = UserId;
    type CreateParams = ();
    type UpdateParams = ();
    type Action = WishlistAction;
    type ActionResult = Wishlist;
    type Error = WishlistError;

    fn id(&self) -> &UserId {
        &self.owner
    }

    /// Wishlists are keyed by their owner and start empty.
    fn from_create_params(owner: UserId, _params: ()) -> Result<Self, WishlistError> {
        Ok(Wishlist::empty(owner))
    }

    fn on_update(&mut self, _update: ()) -> Result<(), WishlistError> {
        Ok(())
    }

    fn handle_action(&mut self, action: WishlistAction) -> Result<Wishlist, WishlistError> {
        match action {
            WishlistAction::Add(product_id) => {
                if !self.products.insert(product_id) {
                    return Err(WishlistError::AlreadyListed {
                        owner: self.owner,
                        product_id,
                    });
                }
            }
            WishlistAction::Remove(product_id) => {
                self.products.remove(&product_id);
            }
            WishlistAction::Clear => self.products.clear(),
        }
        self.updated_at = Utc::now();
        Ok(self.clone())
    }
}

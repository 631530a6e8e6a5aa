use crate::domain::ProductId;

/// Custom actions for Wishlist entities. Each answers with the updated wishlist.
#[derive(Debug, Clone)]
pub enum WishlistAction {
    /// Fails if the product is already listed.
    Add(ProductId),
    /// Removing a product that is not listed is a no-op.
    Remove(ProductId),
    Clear,
}

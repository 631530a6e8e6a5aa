use crate::domain::{ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Products a signed-in user is watching. Discounts on any of them are
/// announced to the owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    pub owner: UserId,
    pub products: BTreeSet<ProductId>,
    pub updated_at: DateTime<Utc>,
}

impl Wishlist {
    pub fn empty(owner: UserId) -> Self {
        Self {
            owner,
            products: BTreeSet::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.products.contains(&product_id)
    }

    /// Listed products among `ids`, in id order.
    pub fn watching(&self, ids: &[ProductId]) -> Vec<ProductId> {
        self.products.iter().copied().filter(|id| ids.contains(id)).collect()
    }
}

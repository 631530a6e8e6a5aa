use crate::domain::{CartOwner, Money, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product the shopper intends to buy. The price is a display snapshot
/// taken when the line was added; checkout re-prices from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price_snapshot: Money,
}

/// A shopper's cart, keyed by its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub owner: CartOwner,
    pub lines: Vec<CartLine>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn empty(owner: CartOwner) -> Self {
        Self {
            owner,
            lines: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Merges into an existing line for the same product, refreshing its snapshot.
    ///
    /// Returns the line's new quantity, or `None` (leaving the cart unchanged)
    /// when the merged quantity would overflow.
    #[must_use]
    pub fn add(&mut self, line: CartLine) -> Option<u32> {
        let quantity = match self.lines.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.checked_add(line.quantity)?;
                existing.unit_price_snapshot = line.unit_price_snapshot;
                existing.quantity
            }
            None => {
                let quantity = line.quantity;
                self.lines.push(line);
                quantity
            }
        };
        self.touch();
        Some(quantity)
    }

    /// Returns `false` when the product is not in the cart.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        let removed = self.lines.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Takes `quantity` units of a product off the cart, dropping emptied lines.
    pub fn subtract(&mut self, product_id: ProductId, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_sub(quantity);
        }
        self.lines.retain(|line| line.quantity > 0);
        self.touch();
    }

    /// Sum of display snapshots; for the live total ask the cart client.
    pub fn snapshot_total(&self) -> Option<Money> {
        self.lines.iter().try_fold(Money::ZERO, |total, line| {
            total.checked_add(line.unit_price_snapshot.checked_times(line.quantity)?)
        })
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

use crate::domain::{Money, Product, Rating};

/// Custom actions for Product entities.
///
/// These actions represent domain-specific operations that can be performed
/// on a product beyond standard CRUD operations. Each one is applied inside a
/// single actor turn, so check-and-modify sequences cannot interleave.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Checks the current stock level without modifying it.
    CheckStock,
    /// Reserves a specified amount of stock.
    ///
    /// # Errors
    /// Fails on a zero quantity or when the amount exceeds available stock.
    ReserveStock(u32),
    /// Returns previously reserved stock.
    ReleaseStock(u32),
    /// Administrative absolute stock level.
    SetStock(u32),
    /// New base price; ends any running discount.
    SetPrice(Money),
    /// Percentage off the base price, 1 to 99. Re-applying replaces the rate.
    ApplyDiscount(u8),
    /// Restores the base price. A product without a discount is left alone.
    RemoveDiscount,
    /// Folds one approved rating into the aggregate.
    ApplyRating(Rating),
    /// Administrative overwrite of the rating aggregate.
    SetRatingAggregate { sum: u64, count: u64 },
}

/// Results from ProductActions - variants match 1:1 with ProductAction,
/// except that every price action answers with `Repriced`
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Current stock level
    CheckStock(u32),
    /// Price observed at the instant of reservation and the stock left after it
    ReserveStock { unit_price: Money, remaining: u32 },
    /// Stock level after the release
    ReleaseStock(u32),
    /// Stock level after the set
    SetStock(u32),
    /// Product after a price change
    Repriced(Product),
    /// New average and count
    ApplyRating { average: f64, count: u64 },
    SetRatingAggregate { average: f64, count: u64 },
}

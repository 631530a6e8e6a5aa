use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::actor_framework::Entity;
use crate::domain::{Money, Product, ProductCreate, ProductId, ProductUpdate, Rating};

impl Entity for Product {
    type Id = ProductId;
    type CreateParams = ProductCreate;
    type UpdateParams = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// Creates a new Product from creation parameters.
    ///
    /// # Errors
    /// A zero price is rejected.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        ensure_price(params.price)?;
        let mut product = Self::new(id, params.name, params.price, params.stock);
        product.description = params.description;
        product.category = params.category;
        Ok(product)
    }

    /// Applies catalog edits.
    ///
    /// # Fields Updated
    /// - `name`, `description`, `category`
    fn on_update(&mut self, update: ProductUpdate) -> Result<(), ProductError> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        Ok(())
    }

    /// Handles stock and rating actions.
    ///
    /// # Errors
    /// - `InvalidQuantity` for zero-unit reserve/release or a release that would overflow
    /// - `InsufficientStock` when a reservation exceeds stock
    /// - `InvalidPrice` when a new or discounted price would be zero
    /// - `InvalidDiscount` for a rate outside 1 to 99
    /// - `InvalidRatingAggregate` when an administrative aggregate is impossible
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::ReserveStock(quantity) => {
                if quantity == 0 {
                    return Err(ProductError::InvalidQuantity(0));
                }
                if quantity > self.stock {
                    return Err(ProductError::InsufficientStock {
                        product_id: self.id,
                        requested: quantity,
                        available: self.stock,
                    });
                }
                self.stock -= quantity;
                Ok(ProductActionResult::ReserveStock {
                    unit_price: self.price,
                    remaining: self.stock,
                })
            }
            ProductAction::ReleaseStock(quantity) => {
                if quantity == 0 {
                    return Err(ProductError::InvalidQuantity(0));
                }
                self.stock = self
                    .stock
                    .checked_add(quantity)
                    .ok_or(ProductError::InvalidQuantity(i64::from(quantity)))?;
                Ok(ProductActionResult::ReleaseStock(self.stock))
            }
            ProductAction::SetStock(stock) => {
                self.stock = stock;
                Ok(ProductActionResult::SetStock(self.stock))
            }
            ProductAction::SetPrice(price) => {
                ensure_price(price)?;
                self.price = price;
                self.original_price = None;
                self.discount_rate = None;
                Ok(ProductActionResult::Repriced(self.clone()))
            }
            ProductAction::ApplyDiscount(rate) => {
                if !(1..=99).contains(&rate) {
                    return Err(ProductError::InvalidDiscount(rate));
                }
                let base = self.original_price.unwrap_or(self.price);
                let discounted = base.discounted(rate);
                ensure_price(discounted)?;
                self.price = discounted;
                self.original_price = Some(base);
                self.discount_rate = Some(rate);
                Ok(ProductActionResult::Repriced(self.clone()))
            }
            ProductAction::RemoveDiscount => {
                if let Some(base) = self.original_price.take() {
                    self.price = base;
                }
                self.discount_rate = None;
                Ok(ProductActionResult::Repriced(self.clone()))
            }
            ProductAction::ApplyRating(rating) => {
                self.rating_sum += u64::from(rating.stars());
                self.rating_count += 1;
                Ok(ProductActionResult::ApplyRating {
                    average: self.average_rating(),
                    count: self.rating_count,
                })
            }
            ProductAction::SetRatingAggregate { sum, count } => {
                let min = count.saturating_mul(u64::from(Rating::MIN));
                let max = count.saturating_mul(u64::from(Rating::MAX));
                if sum < min || sum > max {
                    return Err(ProductError::InvalidRatingAggregate { sum, count });
                }
                self.rating_sum = sum;
                self.rating_count = count;
                Ok(ProductActionResult::SetRatingAggregate {
                    average: self.average_rating(),
                    count,
                })
            }
        }
    }
}

fn ensure_price(price: Money) -> Result<(), ProductError> {
    if price.is_zero() {
        Err(ProductError::InvalidPrice(price))
    } else {
        Ok(())
    }
}

use crate::actor_framework::ResourceClient;
use crate::domain::{
    Capabilities, Money, Product, ProductCreate, ProductId, ProductQuery, ProductUpdate, Rating, RatingAggregate,
    StockFilter, User,
};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Client for the catalog: product records and their queries.
///
/// Stock changes go through [`InventoryLedger`](crate::clients::InventoryLedger);
/// ratings through [`ReviewClient`](crate::clients::ReviewClient).
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductId, ProductError, product);
impl_client_delete!(ProductClient, ProductId, ProductError, product);

impl ProductClient {
    #[instrument(skip(self, params), fields(product_name = %params.name, price = %params.price))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(product_id = %id, "Product created successfully");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: ProductId, update: ProductUpdate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await
    }

    /// Price changes are reserved for sales managers. A new price ends any discount.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn set_price(&self, actor: &User, id: ProductId, price: Money) -> Result<Product, ProductError> {
        ensure_pricing(actor)?;
        debug!("Sending request");
        let product = repriced(self.inner.perform_action(id, ProductAction::SetPrice(price)).await?)?;
        info!(price = %product.price, "Price updated");
        Ok(product)
    }

    /// Takes `rate` percent off the base price of every listed product, or of none.
    ///
    /// # Errors
    /// - `Unauthorized` without the pricing capability
    /// - `InvalidDiscount` for a rate outside 1 to 99
    /// - `NotFound` for the first unknown product; nothing is repriced
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn apply_discount(&self, actor: &User, ids: &[ProductId], rate: u8) -> Result<Vec<Product>, ProductError> {
        ensure_pricing(actor)?;
        debug!("Sending request");
        let actions = ids.iter().map(|&id| (id, ProductAction::ApplyDiscount(rate))).collect();
        let products = self
            .inner
            .transaction(actions)
            .await?
            .into_iter()
            .map(repriced)
            .collect::<Result<Vec<_>, _>>()?;
        info!(products = products.len(), rate, "Discount applied");
        Ok(products)
    }

    /// Puts every listed product back at its base price.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn remove_discount(&self, actor: &User, ids: &[ProductId]) -> Result<Vec<Product>, ProductError> {
        ensure_pricing(actor)?;
        debug!("Sending request");
        let actions = ids.iter().map(|&id| (id, ProductAction::RemoveDiscount)).collect();
        let products = self
            .inner
            .transaction(actions)
            .await?
            .into_iter()
            .map(repriced)
            .collect::<Result<Vec<_>, _>>()?;
        info!(products = products.len(), "Discount removed");
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: ProductQuery) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let filter = query.clone();
        let mut products = self.inner.query(move |product| filter.matches(product)).await?;
        query.sort(&mut products);
        debug!(matches = products.len(), "Search complete");
        Ok(products)
    }

    /// Products with fewer than `threshold` units left.
    pub async fn low_stock(&self, threshold: u32) -> Result<Vec<Product>, ProductError> {
        self.search(ProductQuery::new().with_stock(StockFilter::Below(threshold)))
            .await
    }

    pub async fn out_of_stock(&self) -> Result<Vec<Product>, ProductError> {
        self.search(ProductQuery::new().with_stock(StockFilter::OutOfStock))
            .await
    }

    /// Live prices for a set of products, read in a single store turn.
    #[instrument(skip(self))]
    pub async fn prices(&self, ids: Vec<ProductId>) -> Result<BTreeMap<ProductId, Money>, ProductError> {
        debug!("Sending request");
        let wanted = ids.clone();
        let prices: BTreeMap<_, _> = self
            .inner
            .query(move |product| wanted.contains(&product.id))
            .await?
            .into_iter()
            .map(|product| (product.id, product.price))
            .collect();
        match ids.iter().find(|id| !prices.contains_key(*id)) {
            Some(missing) => Err(ProductError::NotFound(missing.to_string())),
            None => Ok(prices),
        }
    }

    /// Folds one approved rating into the product's aggregate.
    #[instrument(skip(self))]
    pub async fn apply_rating(&self, id: ProductId, rating: Rating) -> Result<RatingAggregate, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::ApplyRating(rating)).await? {
            ProductActionResult::ApplyRating { average, count } => Ok(RatingAggregate { average, count }),
            _ => Err(unexpected_result()),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_rating_aggregate(&self, id: ProductId, sum: u64, count: u64) -> Result<RatingAggregate, ProductError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ProductAction::SetRatingAggregate { sum, count })
            .await?
        {
            ProductActionResult::SetRatingAggregate { average, count } => Ok(RatingAggregate { average, count }),
            _ => Err(unexpected_result()),
        }
    }
}

fn ensure_pricing(actor: &User) -> Result<(), ProductError> {
    if actor.can_manage_pricing() {
        Ok(())
    } else {
        warn!("Price change refused");
        Err(ProductError::Unauthorized(format!("{} cannot change prices", actor.id)))
    }
}

fn repriced(result: ProductActionResult) -> Result<Product, ProductError> {
    match result {
        ProductActionResult::Repriced(product) => Ok(product),
        _ => Err(unexpected_result()),
    }
}

pub(crate) fn unexpected_result() -> ProductError {
    ProductError::ActorCommunicationError("Unexpected result".to_string())
}

use super::product_client::unexpected_result;
use crate::actor_framework::ResourceClient;
use crate::domain::{Money, Product, ProductId};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// Stock adjustments against the catalog store.
///
/// Every method is a single request to the product actor, so each
/// check-and-modify happens in one actor turn and stock can never go negative.
#[derive(Clone)]
pub struct InventoryLedger {
    inner: ResourceClient<Product>,
}

impl_client_new!(InventoryLedger, Product);

impl InventoryLedger {
    #[instrument(skip(self))]
    pub async fn stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::CheckStock(stock) => Ok(stock),
            _ => Err(unexpected_result()),
        }
    }

    /// Takes `quantity` units and returns the unit price at that instant.
    #[instrument(skip(self))]
    pub async fn reserve(&self, id: ProductId, quantity: u32) -> Result<Money, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::ReserveStock(quantity)).await {
            Ok(ProductActionResult::ReserveStock { unit_price, remaining }) => {
                info!(remaining, "Stock reserved");
                Ok(unit_price)
            }
            Ok(_) => Err(unexpected_result()),
            Err(e) => {
                warn!(error = %e, "Reservation refused");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn release(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::ReleaseStock(quantity)).await? {
            ProductActionResult::ReleaseStock(stock) => {
                info!(stock, "Stock released");
                Ok(stock)
            }
            _ => Err(unexpected_result()),
        }
    }

    /// Administrative absolute stock level.
    ///
    /// # Errors
    /// `InvalidQuantity` for negative or out-of-range values.
    #[instrument(skip(self))]
    pub async fn set_stock(&self, id: ProductId, stock: i64) -> Result<u32, ProductError> {
        let stock = u32::try_from(stock).map_err(|_| ProductError::InvalidQuantity(stock))?;
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::SetStock(stock)).await? {
            ProductActionResult::SetStock(stock) => {
                info!(stock, "Stock level set");
                Ok(stock)
            }
            _ => Err(unexpected_result()),
        }
    }

    /// Reserves every line in one actor turn, or none of them.
    ///
    /// Returns the unit price observed for each line, in input order. On
    /// failure no stock has moved and the error names the offending product.
    #[instrument(skip(self))]
    pub async fn reserve_all(&self, lines: &[(ProductId, u32)]) -> Result<Vec<Money>, ProductError> {
        debug!("Sending request");
        let actions = lines
            .iter()
            .map(|&(id, quantity)| (id, ProductAction::ReserveStock(quantity)))
            .collect();
        let results = self.inner.transaction(actions).await.inspect_err(|e| {
            warn!(error = %e, "Reservation refused; no stock moved");
        })?;
        results
            .into_iter()
            .map(|result| match result {
                ProductActionResult::ReserveStock { unit_price, .. } => Ok(unit_price),
                _ => Err(unexpected_result()),
            })
            .collect()
    }

    /// Returns every line's quantity to stock in one actor turn.
    #[instrument(skip(self))]
    pub async fn release_all(&self, lines: &[(ProductId, u32)]) -> Result<(), ProductError> {
        debug!("Sending request");
        let actions = lines
            .iter()
            .map(|&(id, quantity)| (id, ProductAction::ReleaseStock(quantity)))
            .collect();
        self.inner.transaction(actions).await?;
        info!(lines = lines.len(), "Stock released");
        Ok(())
    }

    /// Returns stock for every line whose product is still in the catalog.
    ///
    /// Lines for deleted products are skipped and their ids returned; the
    /// rest are released in one actor turn.
    #[instrument(skip(self))]
    pub async fn restock(&self, lines: &[(ProductId, u32)]) -> Result<Vec<ProductId>, ProductError> {
        debug!("Sending request");
        let wanted: Vec<ProductId> = lines.iter().map(|&(id, _)| id).collect();
        let present: BTreeSet<ProductId> = self
            .inner
            .query(move |product| wanted.contains(&product.id))
            .await?
            .into_iter()
            .map(|product| product.id)
            .collect();
        let (kept, skipped): (Vec<_>, Vec<_>) = lines.iter().copied().partition(|(id, _)| present.contains(id));
        let skipped: Vec<ProductId> = skipped.into_iter().map(|(id, _)| id).collect();
        if !skipped.is_empty() {
            warn!(?skipped, "Products no longer in the catalog; their stock is not returned");
        }
        if !kept.is_empty() {
            self.release_all(&kept).await?;
        }
        Ok(skipped)
    }
}

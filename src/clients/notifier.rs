use crate::domain::{Order, Product, UserId};
use async_trait::async_trait;
use std::fmt::Write;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotificationError {
    #[error("Notification delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Receives every successfully placed order, after it is stored.
///
/// Failures are logged by the caller and never undo the order.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    async fn order_placed(&self, order: &Order) -> Result<(), NotificationError>;
}

/// Tells a shopper that a product on their wishlist just went on sale.
#[async_trait]
pub trait DiscountNotifier: Send + Sync {
    async fn discount_available(&self, user_id: UserId, product: &Product) -> Result<(), NotificationError>;
}

/// Writes invoices and sale announcements to the log instead of sending them anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl OrderNotifier for LoggingNotifier {
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn order_placed(&self, order: &Order) -> Result<(), NotificationError> {
        info!(invoice = %render_invoice(order), "Invoice ready");
        Ok(())
    }
}

#[async_trait]
impl DiscountNotifier for LoggingNotifier {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn discount_available(&self, user_id: UserId, product: &Product) -> Result<(), NotificationError> {
        let rate = product.discount_rate.unwrap_or_default();
        info!(%user_id, rate, price = %product.price, "A product in your wishlist is now {rate}% off");
        Ok(())
    }
}

/// Plain-text invoice: one row per line, then the frozen total.
pub fn render_invoice(order: &Order) -> String {
    let mut invoice = format!("Invoice for {} ({})\n", order.id, order.owner_id);
    for line in &order.lines {
        let _ = write!(invoice, "  {} x{} @ {}", line.product_id, line.quantity, line.unit_price);
        let _ = match line.line_total() {
            Some(total) => writeln!(invoice, " = {total}"),
            None => writeln!(invoice),
        };
    }
    let _ = write!(invoice, "Total: {} (paid via {})", order.total, order.payment_id);
    invoice
}

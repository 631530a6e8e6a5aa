//! Typed clients over the resource actors. Each one is the public face of a
//! component: catalog, inventory ledger, carts, orders, reviews, payments,
//! users, wishlists and sales.

#[macro_use]
mod macros;

pub mod cart_client;
pub mod inventory_ledger;
pub mod notifier;
pub mod order_client;
pub mod payment_client;
pub mod product_client;
pub mod promotion_client;
pub mod review_client;
pub mod user_client;
pub mod wishlist_client;

pub use cart_client::CartClient;
pub use inventory_ledger::InventoryLedger;
pub use notifier::{render_invoice, DiscountNotifier, LoggingNotifier, NotificationError, OrderNotifier};
pub use order_client::OrderClient;
pub use payment_client::{PaymentClient, PaymentPolicy, PaymentProcessor};
pub use product_client::ProductClient;
pub use promotion_client::PromotionClient;
pub use review_client::ReviewClient;
pub use user_client::UserClient;
pub use wishlist_client::WishlistClient;

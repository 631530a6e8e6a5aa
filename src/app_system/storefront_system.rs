use super::SystemConfig;
use crate::actor_framework::ResourceActor;
use crate::clients::{
    CartClient, DiscountNotifier, InventoryLedger, LoggingNotifier, OrderClient, OrderNotifier, PaymentClient,
    ProductClient, PromotionClient, ReviewClient, UserClient, WishlistClient,
};
use crate::domain::{
    Cart, Order, OrderId, Payment, PaymentId, Product, ProductId, Review, ReviewId, User, UserId, Wishlist,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorTaskFailed(#[from] tokio::task::JoinError),
}

/// Sequential ids starting at 1, one counter per store.
fn sequential_ids<I: From<u32> + 'static>() -> impl Fn() -> I + Send + Sync + 'static {
    let counter = Arc::new(AtomicU32::new(1));
    move || I::from(counter.fetch_add(1, Ordering::SeqCst))
}

/// The storefront engine with every store running.
///
/// Responsible for starting up actors, wiring the clients together, and
/// handling shutdown.
pub struct StorefrontSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub inventory: InventoryLedger,
    pub cart_client: CartClient,
    pub order_client: OrderClient,
    pub review_client: ReviewClient,
    pub payment_client: PaymentClient,
    pub wishlist_client: WishlistClient,
    pub promotion_client: PromotionClient,
    pub config: SystemConfig,
    handles: Vec<JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Starts every store, delivering notifications to the log.
    pub fn new(config: SystemConfig) -> Self {
        Self::with_notifiers(config, Arc::new(LoggingNotifier), Arc::new(LoggingNotifier))
    }

    /// Custom order notifications; sale announcements still go to the log.
    pub fn with_notifier(config: SystemConfig, notifier: Arc<dyn OrderNotifier>) -> Self {
        Self::with_notifiers(config, notifier, Arc::new(LoggingNotifier))
    }

    pub fn with_notifiers(
        config: SystemConfig,
        notifier: Arc<dyn OrderNotifier>,
        discount_notifier: Arc<dyn DiscountNotifier>,
    ) -> Self {
        let buffer = config.channel_buffer;

        // 1. Users
        let (user_actor, user_resource_client) = ResourceActor::<User>::new(buffer, sequential_ids::<UserId>());
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        // 2. Catalog; the ledger shares the product store
        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(buffer, sequential_ids::<ProductId>());
        let inventory = InventoryLedger::new(product_resource_client.clone());
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        // 3. Carts, keyed by owner
        let (cart_actor, cart_resource_client) = ResourceActor::<Cart>::keyed(buffer);
        let cart_client = CartClient::new(cart_resource_client, product_client.clone());
        let cart_handle = tokio::spawn(cart_actor.run());

        // 4. Payments
        let (payment_actor, payment_resource_client) =
            ResourceActor::<Payment>::new(buffer, sequential_ids::<PaymentId>());
        let payment_client = PaymentClient::new(payment_resource_client, config.payment_policy);
        let payment_handle = tokio::spawn(payment_actor.run());

        // 5. Orders
        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(buffer, sequential_ids::<OrderId>());
        let order_client = OrderClient::new(
            order_resource_client,
            user_client.clone(),
            cart_client.clone(),
            inventory.clone(),
            Arc::new(payment_client.clone()),
            notifier,
        );
        let order_handle = tokio::spawn(order_actor.run());

        // 6. Reviews
        let (review_actor, review_resource_client) =
            ResourceActor::<Review>::new(buffer, sequential_ids::<ReviewId>());
        let review_client = ReviewClient::new(review_resource_client, product_client.clone());
        let review_handle = tokio::spawn(review_actor.run());

        // 7. Wishlists, keyed by user, and the sales that announce to them
        let (wishlist_actor, wishlist_resource_client) = ResourceActor::<Wishlist>::keyed(buffer);
        let wishlist_client = WishlistClient::new(wishlist_resource_client, product_client.clone(), discount_notifier);
        let promotion_client = PromotionClient::new(product_client.clone(), wishlist_client.clone());
        let wishlist_handle = tokio::spawn(wishlist_actor.run());

        info!(buffer, policy = ?config.payment_policy, "Storefront system started");

        Self {
            user_client,
            product_client,
            inventory,
            cart_client,
            order_client,
            review_client,
            payment_client,
            wishlist_client,
            promotion_client,
            config,
            handles: vec![
                user_handle,
                product_handle,
                cart_handle,
                payment_handle,
                order_handle,
                review_handle,
                wishlist_handle,
            ],
        }
    }

    /// Drops every client so the actors see their channels close, then waits
    /// for each actor task to finish.
    ///
    /// Clones handed out earlier keep their actor alive; drop them first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        let Self {
            user_client,
            product_client,
            inventory,
            cart_client,
            order_client,
            review_client,
            payment_client,
            wishlist_client,
            promotion_client,
            handles,
            ..
        } = self;

        // Drop clients to close channels
        drop(promotion_client);
        drop(wishlist_client);
        drop(order_client);
        drop(review_client);
        drop(cart_client);
        drop(payment_client);
        drop(inventory);
        drop(product_client);
        drop(user_client);

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

use storefront_core::app_system::{setup_tracing, StorefrontSystem, SystemConfig};
use storefront_core::domain::{
    CartOwner, Money, OrderStatus, PaymentMethod, ProductCreate, Role, SessionToken, UserCreate,
};
use chrono::Utc;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = SystemConfig::from_env()?;
    info!(?config, "Starting storefront engine");

    let system = StorefrontSystem::new(config);

    // Users
    let alice = system
        .user_client
        .create_user(UserCreate::customer("Alice", "alice@example.com"))
        .await?;
    let manager_id = system
        .user_client
        .create_user(UserCreate {
            name: "Pat".into(),
            email: "pat@example.com".into(),
            role: Role::ProductManager,
        })
        .await?;
    let manager = system.user_client.require_user(manager_id).await?;
    let sales_id = system
        .user_client
        .create_user(UserCreate {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            role: Role::SalesManager,
        })
        .await?;
    let sales = system.user_client.require_user(sales_id).await?;

    // Catalog
    let lamp = system
        .product_client
        .create_product(
            ProductCreate::new("Desk Lamp", Money::from_dollars(10), 6)
                .in_category("lighting")
                .described_as("Adjustable arm, warm LED"),
        )
        .await?;
    let bulb = system
        .product_client
        .create_product(ProductCreate::new("Spare Bulb", Money::from_dollars(5), 20).in_category("lighting"))
        .await?;

    // Browse anonymously, then log in
    let session = SessionToken::new("demo-session");
    let span = tracing::info_span!("shopping", session = %session);
    async {
        system
            .cart_client
            .add_line(CartOwner::from(session.clone()), lamp, 2)
            .await?;
        system.cart_client.add_line(CartOwner::from(alice), bulb, 1).await?;
        let cart = system.cart_client.merge_session_cart(session.clone(), alice).await?;
        info!(lines = cart.lines.len(), "Cart ready");
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    // Checkout
    let span = tracing::info_span!("checkout", user_id = %alice);
    let order = async {
        let total = system.cart_client.total(CartOwner::from(alice)).await?;
        info!(total = %total, "Cart total");
        system
            .order_client
            .place_order(CartOwner::from(alice), alice, PaymentMethod::CreditCard)
            .await
            .map_err(Box::<dyn std::error::Error>::from)
    }
    .instrument(span)
    .await;

    match order {
        Ok(order) => {
            info!(order_id = %order.id, total = %order.total, "Order processed successfully");
            system
                .order_client
                .update_status(&manager, order.id, OrderStatus::InTransit)
                .await?;
        }
        Err(e) => error!(error = %e, "Order processing failed"),
    }

    // Reviews
    let review = system
        .review_client
        .submit(lamp, alice, 5, "Bright and sturdy")
        .await?;
    let aggregate = system.review_client.approve(&manager, review).await?;
    info!(average = aggregate.average, count = aggregate.count, "Lamp rating");

    // A sale on something Alice is watching
    system.wishlist_client.add(alice, bulb).await?;
    for product in system.promotion_client.apply_discount(&sales, &[bulb], 20).await? {
        info!(product_id = %product.id, price = %product.price, "On sale");
    }

    let today = Utc::now().date_naive();
    for (day, revenue) in system.order_client.revenue_by_day(today, today).await? {
        info!(%day, %revenue, "Revenue");
    }

    for product in system.product_client.low_stock(system.config.low_stock_threshold).await? {
        warn!(product_id = %product.id, stock = product.stock, "Low stock");
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

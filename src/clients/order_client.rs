use crate::actor_framework::ResourceClient;
use crate::clients::{CartClient, InventoryLedger, OrderNotifier, PaymentProcessor, UserClient};
use crate::domain::{
    Capabilities, CartOwner, Money, Order, OrderCreate, OrderId, OrderLine, OrderStatus, PaymentMethod, ProductId,
    User, UserId,
};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::payment_actor::PaymentError;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn, Instrument};

/// Client for the order store and the checkout workflow.
///
/// This client handles the orchestration: it validates the payer, reserves
/// stock, takes payment and only then persists the order.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    cart_client: CartClient,
    ledger: InventoryLedger,
    payments: Arc<dyn PaymentProcessor>,
    notifier: Arc<dyn OrderNotifier>,
}

impl_client_methods!(OrderClient, Order, OrderId, OrderError, order);

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        user_client: UserClient,
        cart_client: CartClient,
        ledger: InventoryLedger,
        payments: Arc<dyn PaymentProcessor>,
        notifier: Arc<dyn OrderNotifier>,
    ) -> Self {
        Self {
            inner,
            user_client,
            cart_client,
            ledger,
            payments,
            notifier,
        }
    }

    /// Turns the cart of `cart_owner` into an order paid for by `payer_id`.
    ///
    /// # Errors
    /// - `Unauthorized` when `cart_owner` is another user's cart
    /// - `NotFound` for an unknown payer or product
    /// - `EmptyCart` when there is nothing to order
    /// - `InsufficientStock` naming the first line that cannot be covered; no stock moves
    /// - `InvalidQuantity` when the order total would overflow
    /// - `PaymentFailed` after every reservation has been released
    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        cart_owner: CartOwner,
        payer_id: UserId,
        method: PaymentMethod,
    ) -> Result<Order, OrderError> {
        info!("Processing place_order request");

        // Step 1: Validate payer; a user's cart is checked out only by that user
        match self.user_client.get_user(payer_id).await? {
            Some(user) => debug!(user_name = %user.name, "Payer validation successful"),
            None => {
                error!("Payer not found");
                return Err(OrderError::NotFound(payer_id.to_string()));
            }
        }
        if let &CartOwner::User(owner_id) = &cart_owner {
            if owner_id != payer_id {
                warn!(%owner_id, "Payer does not own the cart");
                return Err(OrderError::Unauthorized(format!(
                    "{payer_id} cannot check out the cart of {owner_id}"
                )));
            }
        }

        // Step 2: Snapshot the cart
        let cart = self.cart_client.get_cart(cart_owner.clone()).await?;
        if cart.is_empty() {
            warn!("Cart is empty");
            return Err(OrderError::EmptyCart(cart_owner.to_string()));
        }
        let quantities: Vec<_> = cart.lines.iter().map(|line| (line.product_id, line.quantity)).collect();

        // Step 3: Reserve every line at once; prices freeze here
        let unit_prices = self.ledger.reserve_all(&quantities).await.inspect_err(|e| {
            error!(error = %e, "Stock reservation failed");
        })?;
        let lines: Vec<OrderLine> = quantities
            .iter()
            .zip(unit_prices)
            .map(|(&(product_id, quantity), unit_price)| OrderLine {
                product_id,
                quantity,
                unit_price,
            })
            .collect();
        let Some(total) = OrderLine::total_of(&lines) else {
            error!("Order total overflows");
            self.release_after_failure(&quantities).await;
            return Err(OrderError::total_overflow(&lines));
        };
        info!(total = %total, "Stock reserved successfully");

        // Step 4: Take payment, releasing the reservation on any failure
        let payment = match self.payments.charge(total, method).await {
            Ok(payment) if payment.is_completed() => payment,
            Ok(payment) => {
                warn!(payment_id = %payment.id, "Payment declined");
                self.release_after_failure(&quantities).await;
                let declined = PaymentError::Declined {
                    amount: payment.amount,
                    method: payment.method,
                };
                return Err(declined.into());
            }
            Err(e) => {
                self.release_after_failure(&quantities).await;
                return Err(e.into());
            }
        };

        // Step 5: Persist the order
        let params = OrderCreate {
            owner_id: payer_id,
            lines,
            payment_id: payment.id,
        };
        let order_id = match self.inner.create(params).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, payment_id = %payment.id, "Order could not be stored after payment");
                self.release_after_failure(&quantities).await;
                return Err(e);
            }
        };
        let order = self.require_order(order_id).await?;
        info!(order_id = %order.id, total = %order.total, "Order placed");

        // Step 6: Clear the checked-out quantities from the cart
        if let Err(e) = self.cart_client.remove_checked_out(cart_owner, quantities).await {
            warn!(error = %e, "Cart could not be cleared after checkout");
        }

        // Step 7: Notify in the background
        let notifier = Arc::clone(&self.notifier);
        let placed = order.clone();
        tokio::spawn(
            async move {
                if let Err(e) = notifier.order_placed(&placed).await {
                    warn!(error = %e, "Order notification failed");
                }
            }
            .in_current_span(),
        );

        Ok(order)
    }

    async fn release_after_failure(&self, quantities: &[(ProductId, u32)]) {
        match self.ledger.release_all(quantities).await {
            Ok(()) => info!("Reservation released"),
            Err(e) => error!(error = %e, "Reservation could not be released"),
        }
    }

    /// Moves an order along its lifecycle.
    ///
    /// Cancelling returns every line's stock; if that fails the previous
    /// status is put back and the error is returned. Lines whose product has
    /// since been deleted from the catalog are skipped.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn update_status(&self, actor: &User, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        if !actor.can_manage_inventory() {
            warn!("Status change refused");
            return Err(OrderError::Unauthorized(format!("{} cannot manage orders", actor.id)));
        }

        debug!("Sending request");
        let (previous, order) = match self.inner.perform_action(id, OrderAction::Transition(status)).await? {
            OrderActionResult::Transition { previous, order } => (previous, order),
            OrderActionResult::Restore(_) => {
                return Err(OrderError::ActorCommunicationError("Unexpected result".to_string()));
            }
        };

        if status == OrderStatus::Cancelled {
            match self.ledger.restock(&order.quantities()).await {
                Ok(skipped) if !skipped.is_empty() => warn!(?skipped, "Cancelled with lines for deleted products"),
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, "Stock release failed; restoring {previous}");
                    self.inner.perform_action(id, OrderAction::Restore(previous)).await?;
                    return Err(e.into());
                }
            }
        }

        info!(from = %previous, to = %order.status, closed = order.status.is_terminal(), "Order status updated");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn orders_for_owner(&self, owner_id: UserId) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.inner.query(move |order| order.owner_id == owner_id).await
    }

    #[instrument(skip(self))]
    pub async fn orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.inner.query(move |order| order.status == status).await
    }

    /// Orders created between `from` and `to`, both whole UTC days included, newest first.
    #[instrument(skip(self))]
    pub async fn orders_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Order>, OrderError> {
        if from > to {
            return Err(OrderError::InvalidDateRange { from, to });
        }
        debug!("Sending request");
        let mut orders = self
            .inner
            .query(move |order| (from..=to).contains(&order.created_at.date_naive()))
            .await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    /// Revenue per UTC day over the range; cancelled orders do not count.
    ///
    /// Days without a sale are absent from the map.
    #[instrument(skip(self))]
    pub async fn revenue_by_day(&self, from: NaiveDate, to: NaiveDate) -> Result<BTreeMap<NaiveDate, Money>, OrderError> {
        let orders = self.orders_between(from, to).await?;
        let mut revenue: BTreeMap<NaiveDate, Money> = BTreeMap::new();
        for order in orders.iter().filter(|order| order.status != OrderStatus::Cancelled) {
            let day = order.created_at.date_naive();
            let entry = revenue.entry(day).or_default();
            *entry = entry.checked_add(order.total).ok_or(OrderError::RevenueOverflow(day))?;
        }
        info!(days = revenue.len(), orders = orders.len(), "Revenue summarized");
        Ok(revenue)
    }
}

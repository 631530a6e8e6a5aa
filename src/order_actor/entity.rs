use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderId};
use chrono::Utc;

impl Entity for Order {
    type Id = OrderId;
    type CreateParams = OrderCreate;
    type UpdateParams = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// Creates a `Processing` order, computing its total once from the frozen lines.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.lines.is_empty() {
            return Err(OrderError::EmptyCart(params.owner_id.to_string()));
        }
        let overflow = OrderError::total_overflow(&params.lines);
        Order::new(id, params.owner_id, params.lines, params.payment_id).ok_or(overflow)
    }

    /// Orders are never edited; only status transitions are allowed.
    fn on_update(&mut self, _update: ()) -> Result<(), OrderError> {
        Err(OrderError::Immutable(self.id.to_string()))
    }

    /// Orders are never deleted.
    fn on_delete(&self) -> Result<(), OrderError> {
        Err(OrderError::Immutable(self.id.to_string()))
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::Transition(next) => {
                if !self.status.can_transition_to(next) {
                    return Err(OrderError::InvalidStateTransition {
                        from: self.status,
                        to: next,
                    });
                }
                let previous = self.status;
                self.status = next;
                self.updated_at = Utc::now();
                Ok(OrderActionResult::Transition {
                    previous,
                    order: self.clone(),
                })
            }
            OrderAction::Restore(status) => {
                self.status = status;
                self.updated_at = Utc::now();
                Ok(OrderActionResult::Restore(self.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Money, OrderLine, OrderStatus, PaymentId, ProductId, UserId};

    fn order() -> Order {
        let lines = vec![OrderLine {
            product_id: ProductId(1),
            quantity: 1,
            unit_price: Money::from_dollars(3),
        }];
        Order::from_create_params(
            OrderId(1),
            OrderCreate { owner_id: UserId(1), lines, payment_id: PaymentId(1) },
        )
        .unwrap()
    }

    #[test]
    fn orders_without_lines_are_rejected() {
        let params = OrderCreate { owner_id: UserId(4), lines: vec![], payment_id: PaymentId(1) };
        assert_eq!(
            Order::from_create_params(OrderId(1), params),
            Err(OrderError::EmptyCart("user_4".into()))
        );
    }

    #[test]
    fn orders_whose_total_overflows_are_rejected() {
        let lines = vec![
            OrderLine { product_id: ProductId(1), quantity: 2, unit_price: Money::from_cents(u64::MAX / 3) },
            OrderLine { product_id: ProductId(2), quantity: 2, unit_price: Money::from_cents(u64::MAX / 3) },
        ];
        let params = OrderCreate { owner_id: UserId(1), lines, payment_id: PaymentId(1) };
        assert_eq!(Order::from_create_params(OrderId(1), params), Err(OrderError::InvalidQuantity(4)));
    }

    #[test]
    fn delivered_orders_cannot_be_cancelled() {
        let mut order = order();
        order.handle_action(OrderAction::Transition(OrderStatus::InTransit)).unwrap();
        order.handle_action(OrderAction::Transition(OrderStatus::Delivered)).unwrap();
        assert_eq!(
            order.handle_action(OrderAction::Transition(OrderStatus::Cancelled)),
            Err(OrderError::InvalidStateTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Cancelled,
            })
        );
        assert_eq!(order.total, Money::from_dollars(3));
    }

    #[test]
    fn edits_and_deletes_are_refused() {
        let mut order = order();
        assert_eq!(order.on_update(()), Err(OrderError::Immutable("order_1".into())));
        assert_eq!(order.on_delete(), Err(OrderError::Immutable("order_1".into())));
    }
}

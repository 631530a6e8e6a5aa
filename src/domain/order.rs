use crate::domain::{Money, OrderId, PaymentId, ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Lifecycle of an order. `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    InTransit,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Processing, InTransit) | (InTransit, Delivered) | (Processing, Cancelled) | (InTransit, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Processing => "processing",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// One ordered product with its price frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Money,
}

impl OrderLine {
    /// `None` when the line total does not fit in [`Money`].
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_times(self.quantity)
    }

    pub fn total_of(lines: &[OrderLine]) -> Option<Money> {
        lines
            .iter()
            .try_fold(Money::ZERO, |total, line| total.checked_add(line.line_total()?))
    }
}

/// Represents a customer order.
///
/// Lines and total are fixed at creation; only `status` (and `updated_at`)
/// ever change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub owner_id: UserId,
    pub lines: Vec<OrderLine>,
    pub total: Money,
    pub status: OrderStatus,
    pub payment_id: PaymentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Builds a `Processing` order; the total is derived from the lines here and nowhere else.
    ///
    /// Returns `None` when the total would overflow.
    pub fn new(id: OrderId, owner_id: UserId, lines: Vec<OrderLine>, payment_id: PaymentId) -> Option<Self> {
        let total = OrderLine::total_of(&lines)?;
        let now = Utc::now();
        Some(Self {
            id,
            owner_id,
            lines,
            total,
            status: OrderStatus::Processing,
            payment_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// (product, quantity) pairs, the shape the inventory ledger works in.
    pub fn quantities(&self) -> Vec<(ProductId, u32)> {
        self.lines.iter().map(|line| (line.product_id, line.quantity)).collect()
    }
}

/// Params for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub owner_id: UserId,
    pub lines: Vec<OrderLine>,
    pub payment_id: PaymentId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::OrderStatus::*;

    #[test]
    fn state_machine_successors() {
        assert!(Processing.can_transition_to(InTransit));
        assert!(InTransit.can_transition_to(Delivered));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(InTransit.can_transition_to(Cancelled));

        assert!(!Processing.can_transition_to(Delivered));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Processing));
        assert!(!InTransit.can_transition_to(InTransit));
        assert!(Delivered.is_terminal() && Cancelled.is_terminal() && !InTransit.is_terminal());
    }

    #[test]
    fn total_is_sum_of_line_totals() {
        let lines = vec![
            OrderLine { product_id: ProductId(1), quantity: 2, unit_price: Money::from_dollars(10) },
            OrderLine { product_id: ProductId(2), quantity: 1, unit_price: Money::from_dollars(5) },
        ];
        let order = Order::new(OrderId(1), UserId(1), lines, PaymentId(1)).unwrap();
        assert_eq!(order.total, Money::from_dollars(25));
        assert_eq!(order.status, Processing);
        assert_eq!(order.quantities(), vec![(ProductId(1), 2), (ProductId(2), 1)]);
    }

    #[test]
    fn overflowing_total_is_refused() {
        let line = OrderLine { product_id: ProductId(1), quantity: 3, unit_price: Money::from_cents(u64::MAX / 2) };
        assert_eq!(line.line_total(), None);
        assert!(Order::new(OrderId(1), UserId(1), vec![line], PaymentId(1)).is_none());
    }
}

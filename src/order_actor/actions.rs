use crate::domain::{Order, OrderStatus};

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to a permitted successor status.
    ///
    /// # Errors
    /// `InvalidStateTransition` when `status` does not follow the current one.
    Transition(OrderStatus),
    /// Puts back a status after a failed side effect of a transition.
    /// Bypasses the state machine; only the workflow issues it.
    Restore(OrderStatus),
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    Transition { previous: OrderStatus, order: Order },
    Restore(Order),
}

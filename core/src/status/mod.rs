// carta/src/status/mod.rs

//! Order lifecycle.
//!
//! ```text
//! pendiente -> confirmado -> preparando -> listo -> entregado
//!     |
//!     +-----> cancelado
//! ```
//!
//! [`transition`] is the only place a status change is decided; the
//! [`OrderStatusMachine`] wraps it with loading, persistence and notices.

pub mod machine;

use crate::error::{CartaError, CartaResult};
use crate::model::{Order, OrderStatus};

pub use machine::OrderStatusMachine;

/// All statuses in lifecycle order, cancellation last.
pub const ORDER_STATUSES: [OrderStatus; 6] = [
  OrderStatus::Pending,
  OrderStatus::Confirmed,
  OrderStatus::Preparing,
  OrderStatus::Ready,
  OrderStatus::Delivered,
  OrderStatus::Cancelled,
];

/// Targets reachable from `status` in one step.
pub fn allowed_next(status: OrderStatus) -> &'static [OrderStatus] {
  match status {
    OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
    OrderStatus::Confirmed => &[OrderStatus::Preparing],
    OrderStatus::Preparing => &[OrderStatus::Ready],
    OrderStatus::Ready => &[OrderStatus::Delivered],
    OrderStatus::Delivered | OrderStatus::Cancelled => &[],
  }
}

pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
  allowed_next(from).contains(&to)
}

pub fn is_terminal(status: OrderStatus) -> bool {
  allowed_next(status).is_empty()
}

/// Successor on the happy path; `None` for terminal statuses.
pub fn next_step(status: OrderStatus) -> Option<OrderStatus> {
  allowed_next(status).first().copied()
}

/// Returns `order` with its status set to `target`, or `IllegalTransition`
/// if the table has no such edge. No other field changes.
pub fn transition(order: &Order, target: OrderStatus) -> CartaResult<Order> {
  if !can_transition(order.status, target) {
    return Err(CartaError::IllegalTransition {
      order_id: order.id,
      current: order.status,
      requested: target,
    });
  }
  Ok(order.clone().with_status(target))
}

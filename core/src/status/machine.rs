// carta/src/status/machine.rs
use std::sync::Arc;
use tracing::{event, instrument, Level};

use super::transition;
use crate::error::CartaResult;
use crate::model::{Order, OrderPatch, OrderStatus};
use crate::notify::Notifier;
use crate::shared::KeyedLocks;
use crate::store::OrderStore;

/// Applies status transitions to stored orders.
///
/// Calls for the same order id are serialized in arrival order (tokio's
/// mutex is fair); calls for different orders run independently.
pub struct OrderStatusMachine {
  orders: Arc<dyn OrderStore>,
  notifier: Arc<dyn Notifier>,
  in_flight: KeyedLocks<u64>,
}

impl OrderStatusMachine {
  pub fn new(orders: Arc<dyn OrderStore>, notifier: Arc<dyn Notifier>) -> Self {
    OrderStatusMachine {
      orders,
      notifier,
      in_flight: KeyedLocks::new(),
    }
  }

  /// Loads order `id`, moves it to `target` and persists the new status.
  ///
  /// On an illegal transition or a store failure nothing is written, an
  /// error notice is emitted and the error is returned.
  #[instrument(name = "OrderStatusMachine::apply", skip(self))]
  pub async fn apply(&self, id: u64, target: OrderStatus) -> CartaResult<Order> {
    let result = self.in_flight.serialize(id, self.apply_serialized(id, target)).await;

    match &result {
      Ok(order) => {
        event!(Level::INFO, order_id = id, status = %order.status, "Order status updated.");
        self.notifier.success(&format!("Pedido actualizado a {}", order.status));
      }
      Err(e) => {
        event!(Level::WARN, order_id = id, error = %e, "Order status update rejected.");
        self.notifier.error("Error al actualizar el pedido");
      }
    }
    result
  }

  /// Shorthand for `apply(id, OrderStatus::Cancelled)`.
  pub async fn cancel(&self, id: u64) -> CartaResult<Order> {
    self.apply(id, OrderStatus::Cancelled).await
  }

  async fn apply_serialized(&self, id: u64, target: OrderStatus) -> CartaResult<Order> {
    let current = self.orders.get_by_id(id).await?;
    let next = transition(&current, target)?;
    self.orders.update(id, OrderPatch::status(next.status)).await
  }

  #[cfg(test)]
  fn tracked_orders(&self) -> usize {
    self.in_flight.len()
  }
}

impl std::fmt::Debug for OrderStatusMachine {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OrderStatusMachine")
      .field("in_flight", &self.in_flight.len())
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::notify::TracingNotifier;
  use crate::store::seed::demo_orders;
  use crate::store::MemoryStore;

  fn machine() -> OrderStatusMachine {
    OrderStatusMachine::new(
      Arc::new(MemoryStore::with_records(demo_orders())),
      Arc::new(TracingNotifier::new("test")),
    )
  }

  #[tokio::test]
  async fn lock_entries_are_released() {
    let machine = machine();
    machine.apply(5, OrderStatus::Confirmed).await.unwrap();
    machine.apply(5, OrderStatus::Delivered).await.unwrap_err();
    assert_eq!(machine.tracked_orders(), 0);
  }
}

// carta/src/orders.rs

//! Dashboard view over orders: filtering, per-customer summaries and the
//! admin operations that sit next to the status machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::error::CartaResult;
use crate::model::{Order, OrderStatus};
use crate::status::OrderStatusMachine;
use crate::store::OrderStore;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderFilter {
  /// Customer name (case-insensitive) or a fragment of the order id.
  #[serde(default, alias = "q")]
  pub search: Option<String>,
  #[serde(default)]
  pub status: Option<OrderStatus>,
}

/// Matching orders, newest first.
pub fn filter_orders(orders: &[Order], filter: &OrderFilter) -> Vec<Order> {
  let search = filter
    .search
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_lowercase);

  let mut matched: Vec<Order> = orders
    .iter()
    .filter(|o| match &search {
      Some(s) => o.customer.name.to_lowercase().contains(s.as_str()) || o.id.to_string().contains(s.as_str()),
      None => true,
    })
    .filter(|o| filter.status.map_or(true, |status| o.status == status))
    .cloned()
    .collect();
  matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
  matched
}

/// A customer as seen through their orders, keyed by phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
  pub name: String,
  pub phone: String,
  pub email: String,
  pub order_count: usize,
  /// Cancelled orders are not counted.
  pub total_spent_cents: u64,
  pub last_order_at: DateTime<Utc>,
}

/// One summary per phone number, most recent customer first. Name and email
/// come from the customer's latest order.
pub fn customer_summaries(orders: &[Order]) -> Vec<CustomerSummary> {
  let mut by_phone: HashMap<&str, CustomerSummary> = HashMap::new();
  for order in orders {
    let entry = by_phone
      .entry(order.customer.phone.as_str())
      .or_insert_with(|| CustomerSummary {
        name: order.customer.name.clone(),
        phone: order.customer.phone.clone(),
        email: order.customer.email.clone(),
        order_count: 0,
        total_spent_cents: 0,
        last_order_at: order.created_at,
      });
    entry.order_count += 1;
    if order.status != OrderStatus::Cancelled {
      entry.total_spent_cents = entry.total_spent_cents.saturating_add(order.total_cents());
    }
    if order.created_at >= entry.last_order_at {
      entry.last_order_at = order.created_at;
      entry.name = order.customer.name.clone();
      entry.email = order.customer.email.clone();
    }
  }
  let mut summaries: Vec<CustomerSummary> = by_phone.into_values().collect();
  summaries.sort_by(|a, b| b.last_order_at.cmp(&a.last_order_at).then_with(|| a.phone.cmp(&b.phone)));
  summaries
}

pub struct OrderBoard {
  orders: Arc<dyn OrderStore>,
  machine: Arc<OrderStatusMachine>,
}

impl OrderBoard {
  pub fn new(orders: Arc<dyn OrderStore>, machine: Arc<OrderStatusMachine>) -> Self {
    OrderBoard { orders, machine }
  }

  pub async fn list(&self, filter: &OrderFilter) -> CartaResult<Vec<Order>> {
    Ok(filter_orders(&self.orders.get_all().await?, filter))
  }

  pub async fn get(&self, id: u64) -> CartaResult<Order> {
    self.orders.get_by_id(id).await
  }

  pub async fn set_status(&self, id: u64, status: OrderStatus) -> CartaResult<Order> {
    self.machine.apply(id, status).await
  }

  /// Administrative removal; bypasses the status machine.
  #[instrument(name = "OrderBoard::delete", skip(self))]
  pub async fn delete(&self, id: u64) -> CartaResult<Order> {
    let removed = self.orders.delete(id).await?;
    event!(Level::INFO, order_id = id, status = %removed.status, "Order deleted by admin.");
    Ok(removed)
  }

  pub async fn customers(&self) -> CartaResult<Vec<CustomerSummary>> {
    Ok(customer_summaries(&self.orders.get_all().await?))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::seed::demo_orders;

  fn ids(orders: &[Order]) -> Vec<u64> {
    orders.iter().map(|o| o.id).collect()
  }

  #[test]
  fn newest_first() {
    assert_eq!(ids(&filter_orders(&demo_orders(), &OrderFilter::default())), vec![1, 2, 3, 4, 5]);
  }

  #[test]
  fn search_by_name_or_id() {
    let by_name = OrderFilter {
      search: Some("lópez".to_string()),
      ..Default::default()
    };
    assert_eq!(ids(&filter_orders(&demo_orders(), &by_name)), vec![2, 3]);

    let by_id = OrderFilter {
      search: Some("4".to_string()),
      ..Default::default()
    };
    assert_eq!(ids(&filter_orders(&demo_orders(), &by_id)), vec![4]);
  }

  #[test]
  fn status_filter() {
    let ready = OrderFilter {
      status: Some(OrderStatus::Ready),
      ..Default::default()
    };
    assert_eq!(ids(&filter_orders(&demo_orders(), &ready)), vec![2]);
  }

  #[test]
  fn summaries_group_by_phone() {
    let mut orders = demo_orders();
    let mut repeat = orders[0].clone();
    repeat.id = 6;
    repeat.created_at += chrono::Duration::hours(1);
    repeat.status = OrderStatus::Cancelled;
    orders.push(repeat);

    let summaries = customer_summaries(&orders);
    assert_eq!(summaries.len(), 5);
    let ana = &summaries[0];
    assert_eq!(ana.phone, "+52 55 1234 5678");
    assert_eq!(ana.order_count, 2);
    assert_eq!(ana.total_spent_cents, 19500);
  }
}

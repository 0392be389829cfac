// tests/transition_props.rs
use carta::model::NewOrder;
use carta::status::{allowed_next, can_transition, is_terminal, next_step, transition, ORDER_STATUSES};
use carta::{CartaError, Customer, LineItem, Order, OrderDraft, OrderStatus, Record};
use chrono::Utc;
use proptest::prelude::*;

fn any_status() -> impl Strategy<Value = OrderStatus> {
  proptest::sample::select(ORDER_STATUSES.to_vec())
}

fn any_lines() -> impl Strategy<Value = Vec<LineItem>> {
  proptest::collection::vec((1u64..50, 0u64..100_000, 1u32..20), 1..8).prop_map(|lines| {
    lines
      .into_iter()
      .map(|(id, price, qty)| LineItem::new(id, format!("Producto {}", id), price, qty))
      .collect()
  })
}

fn order_with(status: OrderStatus, items: Vec<LineItem>) -> Order {
  let draft = OrderDraft {
    customer: Customer::new("Ana", "555"),
    address: "Calle Reforma 567".to_string(),
    ..Default::default()
  };
  Order::from_new(1, NewOrder::from_draft(&draft, items), Utc::now()).with_status(status)
}

proptest! {
  #[test]
  fn transition_follows_the_table(from in any_status(), to in any_status(), items in any_lines()) {
    let order = order_with(from, items);
    match transition(&order, to) {
      Ok(next) => {
        prop_assert!(allowed_next(from).contains(&to));
        prop_assert_eq!(next.status, to);
        prop_assert_eq!(next.items(), order.items());
        prop_assert_eq!(next.total_cents(), order.total_cents());
        prop_assert_eq!(next.created_at, order.created_at);
      }
      Err(CartaError::IllegalTransition { current, requested, .. }) => {
        prop_assert!(!can_transition(from, to));
        prop_assert_eq!(current, from);
        prop_assert_eq!(requested, to);
      }
      Err(other) => prop_assert!(false, "unexpected error {:?}", other),
    }
  }

  #[test]
  fn total_is_sum_of_line_subtotals(items in any_lines()) {
    let expected: u64 = items.iter().map(|l| l.unit_price_cents * u64::from(l.quantity)).sum();
    let order = order_with(OrderStatus::Pending, items.clone());
    prop_assert_eq!(order.total_cents(), expected);

    let json = serde_json::to_string(&order).unwrap();
    let back: Order = serde_json::from_str(&json).unwrap();
    prop_assert_eq!(back.total_cents(), expected);
  }

  #[test]
  fn terminal_means_no_successor(status in any_status()) {
    prop_assert_eq!(is_terminal(status), next_step(status).is_none());
  }
}

#[test]
fn every_status_reaches_a_terminal_state() {
  for start in ORDER_STATUSES {
    let mut status = start;
    let mut hops = 0;
    while let Some(next) = next_step(status) {
      status = next;
      hops += 1;
      assert!(hops <= ORDER_STATUSES.len(), "cycle from {}", start);
    }
    assert!(is_terminal(status));
  }
}

use carta::model::NewOrder;
use carta::orders::{customer_summaries, filter_orders, OrderFilter};
use carta::status::transition;
use carta::store::seed::demo_orders;
use carta::{
  CheckoutWizard, Customer, DeliveryType, LineItem, MemoryStore, Order, OrderDraft, OrderStatus, Record,
  TracingNotifier,
};
use chrono::{Duration, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use tokio::runtime::Runtime;

// --- Fixtures ---

fn synthetic_orders(n: u64) -> Vec<Order> {
  let statuses = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::Delivered,
  ];
  let start = Utc::now();
  (1..=n)
    .map(|id| {
      let draft = OrderDraft {
        delivery_type: DeliveryType::Pickup,
        customer: Customer::new(format!("Cliente {}", id % 97), format!("+52 55 {:04}", id % 97)),
        ..Default::default()
      };
      let items = vec![
        LineItem::new(1, "Tacos de Pastor", 8500, (id % 4 + 1) as u32),
        LineItem::new(3, "Agua de Horchata", 2500, 1),
      ];
      Order::from_new(id, NewOrder::from_draft(&draft, items), start - Duration::minutes(id as i64))
        .with_status(statuses[(id % 5) as usize])
    })
    .collect()
}

// --- Benchmark Functions ---

fn bench_transition(c: &mut Criterion) {
  let order = demo_orders().remove(4);
  c.bench_function("transition_pending_to_confirmed", |b| {
    b.iter(|| transition(&order, OrderStatus::Confirmed))
  });
  c.bench_function("transition_illegal", |b| {
    b.iter(|| transition(&order, OrderStatus::Delivered))
  });
}

fn bench_order_board(c: &mut Criterion) {
  let mut group = c.benchmark_group("order_board");
  for size in [100u64, 1_000, 10_000] {
    let orders = synthetic_orders(size);
    let filter = OrderFilter {
      search: Some("cliente 4".to_string()),
      status: Some(OrderStatus::Ready),
    };
    group.throughput(Throughput::Elements(size));
    group.bench_with_input(BenchmarkId::new("filter_orders", size), &orders, |b, orders| {
      b.iter(|| filter_orders(orders, &filter))
    });
    group.bench_with_input(BenchmarkId::new("customer_summaries", size), &orders, |b, orders| {
      b.iter(|| customer_summaries(orders))
    });
  }
  group.finish();
}

fn bench_checkout_submit(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let store = Arc::new(MemoryStore::<Order>::new());
  let notifier = Arc::new(TracingNotifier::new("bench"));

  c.bench_function("checkout_start_to_submit", |b| {
    b.to_async(&rt).iter(|| {
      let store = store.clone();
      let notifier = notifier.clone();
      async move {
        let wizard = CheckoutWizard::start(
          "bench",
          vec![LineItem::new(1, "Tacos de Pastor", 8500, 2)],
          store,
          notifier,
        )
        .unwrap();
        let draft = OrderDraft {
          delivery_type: DeliveryType::Pickup,
          customer: Customer::new("Ana", "555"),
          ..Default::default()
        };
        wizard.update_draft(draft).unwrap();
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        wizard.submit().await.unwrap()
      }
    })
  });
}

criterion_group!(benches, bench_transition, bench_order_board, bench_checkout_submit);
criterion_main!(benches);

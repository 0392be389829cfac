// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use carta::{
  CartaError, CartaResult, Customer, DeliveryType, LineItem, MemoryStore, NoticeKind, Notifier, Order, OrderDraft,
  OrderPatch, Record, Store,
};
use carta::model::NewOrder;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{Notify, Semaphore};
use tracing::Level;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Notifications ---

#[derive(Debug, Default)]
pub struct RecordingNotifier {
  notices: Mutex<Vec<(NoticeKind, String)>>,
}

impl RecordingNotifier {
  pub fn notices(&self) -> Vec<(NoticeKind, String)> {
    self.notices.lock().clone()
  }

  pub fn last(&self) -> Option<(NoticeKind, String)> {
    self.notices.lock().last().cloned()
  }

  pub fn count(&self, kind: NoticeKind) -> usize {
    self.notices.lock().iter().filter(|(k, _)| *k == kind).count()
  }
}

impl Notifier for RecordingNotifier {
  fn notify(&self, kind: NoticeKind, message: &str) {
    tracing::debug!(target: "test_notifier", %kind, "{}", message);
    self.notices.lock().push((kind, message.to_string()));
  }
}

// --- Order store with counters, failures and an optional gate on create ---

pub struct ProbeOrderStore {
  inner: MemoryStore<Order>,
  pub creates: AtomicUsize,
  pub updates: AtomicUsize,
  fail_creates: AtomicUsize,
  fail_updates: AtomicBool,
  gated: bool,
  create_started: Notify,
  create_release: Semaphore,
}

impl ProbeOrderStore {
  pub fn new(records: Vec<Order>) -> Self {
    ProbeOrderStore {
      inner: MemoryStore::with_records(records),
      creates: AtomicUsize::new(0),
      updates: AtomicUsize::new(0),
      fail_creates: AtomicUsize::new(0),
      fail_updates: AtomicBool::new(false),
      gated: false,
      create_started: Notify::new(),
      create_release: Semaphore::new(0),
    }
  }

  /// `create` parks until [`ProbeOrderStore::release_create`] is called.
  pub fn gated(mut self) -> Self {
    self.gated = true;
    self
  }

  /// The next `n` creates fail.
  pub fn failing_creates(self, n: usize) -> Self {
    self.fail_creates.store(n, Ordering::SeqCst);
    self
  }

  pub fn fail_updates(&self, fail: bool) {
    self.fail_updates.store(fail, Ordering::SeqCst);
  }

  pub async fn create_started(&self) {
    self.create_started.notified().await;
  }

  pub fn release_create(&self) {
    self.create_release.add_permits(1);
  }

  pub fn creates(&self) -> usize {
    self.creates.load(Ordering::SeqCst)
  }

  pub fn updates(&self) -> usize {
    self.updates.load(Ordering::SeqCst)
  }

  pub fn len(&self) -> usize {
    self.inner.len()
  }
}

#[async_trait]
impl Store<Order> for ProbeOrderStore {
  async fn get_all(&self) -> CartaResult<Vec<Order>> {
    self.inner.get_all().await
  }

  async fn get_by_id(&self, id: u64) -> CartaResult<Order> {
    // Give concurrent callers a chance to interleave.
    tokio::task::yield_now().await;
    self.inner.get_by_id(id).await
  }

  async fn create(&self, new: NewOrder) -> CartaResult<Order> {
    self.creates.fetch_add(1, Ordering::SeqCst);
    if self.gated {
      self.create_started.notify_one();
      let permit = self
        .create_release
        .acquire()
        .await
        .map_err(|e| CartaError::store("Pedido", e))?;
      permit.forget();
    }
    let should_fail = self
      .fail_creates
      .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
      .is_ok();
    if should_fail {
      return Err(CartaError::store("Pedido", anyhow::anyhow!("connection reset")));
    }
    self.inner.create(new).await
  }

  async fn update(&self, id: u64, patch: OrderPatch) -> CartaResult<Order> {
    tokio::task::yield_now().await;
    if self.fail_updates.load(Ordering::SeqCst) {
      return Err(CartaError::store("Pedido", anyhow::anyhow!("write timeout")));
    }
    self.updates.fetch_add(1, Ordering::SeqCst);
    self.inner.update(id, patch).await
  }

  async fn delete(&self, id: u64) -> CartaResult<Order> {
    self.inner.delete(id).await
  }
}

// --- Store that yields before every call so concurrent callers interleave ---

pub struct YieldingStore<R: Record> {
  inner: MemoryStore<R>,
}

impl<R: Record> YieldingStore<R> {
  pub fn new(records: Vec<R>) -> Self {
    YieldingStore {
      inner: MemoryStore::with_records(records),
    }
  }
}

#[async_trait]
impl<R: Record> Store<R> for YieldingStore<R> {
  async fn get_all(&self) -> CartaResult<Vec<R>> {
    tokio::task::yield_now().await;
    self.inner.get_all().await
  }

  async fn get_by_id(&self, id: u64) -> CartaResult<R> {
    tokio::task::yield_now().await;
    self.inner.get_by_id(id).await
  }

  async fn create(&self, new: R::New) -> CartaResult<R> {
    tokio::task::yield_now().await;
    self.inner.create(new).await
  }

  async fn update(&self, id: u64, patch: R::Patch) -> CartaResult<R> {
    tokio::task::yield_now().await;
    self.inner.update(id, patch).await
  }

  async fn delete(&self, id: u64) -> CartaResult<R> {
    tokio::task::yield_now().await;
    self.inner.delete(id).await
  }
}

// --- Fixtures ---

pub fn tacos_and_horchata() -> Vec<LineItem> {
  vec![
    LineItem::new(1, "Tacos de Pastor", 8500, 2),
    LineItem::new(3, "Agua de Horchata", 2500, 1),
  ]
}

pub fn pickup_draft(name: &str, phone: &str) -> OrderDraft {
  OrderDraft {
    delivery_type: DeliveryType::Pickup,
    customer: Customer::new(name, phone),
    ..Default::default()
  }
}

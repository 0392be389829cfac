// carta/src/store/mod.rs

//! Store contracts.
//!
//! Every record kind is served by the same async CRUD shape. The services in
//! this crate depend only on these traits; implementations live in
//! [`memory`] (in-process) and in the server crate (Postgres).

pub mod memory;
pub mod seed;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CartaResult;
use crate::model::{Menu, Order, Product, Review};

pub use memory::MemoryStore;

/// A record a store owns: it knows its id and how to be built from a
/// creation request and updated from a patch.
pub trait Record: Clone + Send + Sync + 'static {
  /// Creation request; the store assigns id and timestamp.
  type New: Send + 'static;
  /// Partial update accepted by `update`.
  type Patch: Send + 'static;
  /// Human-readable kind, used in `NotFound` errors.
  const ENTITY: &'static str;

  fn id(&self) -> u64;
  fn created_at(&self) -> DateTime<Utc>;
  fn from_new(id: u64, new: Self::New, now: DateTime<Utc>) -> Self;
  fn apply_patch(&mut self, patch: Self::Patch);
}

#[async_trait]
pub trait Store<R: Record>: Send + Sync {
  async fn get_all(&self) -> CartaResult<Vec<R>>;

  /// Fails with `CartaError::NotFound` if `id` is absent.
  async fn get_by_id(&self, id: u64) -> CartaResult<R>;

  /// Assigns `id = max existing + 1`.
  async fn create(&self, new: R::New) -> CartaResult<R>;

  /// Fails with `CartaError::NotFound` if `id` is absent.
  async fn update(&self, id: u64, patch: R::Patch) -> CartaResult<R>;

  /// Fails with `CartaError::NotFound` if `id` is absent.
  async fn delete(&self, id: u64) -> CartaResult<R>;
}

pub trait OrderStore: Store<Order> {}
impl<S: Store<Order> + ?Sized> OrderStore for S {}

pub trait ReviewStore: Store<Review> {}
impl<S: Store<Review> + ?Sized> ReviewStore for S {}

pub trait ProductStore: Store<Product> {}
impl<S: Store<Product> + ?Sized> ProductStore for S {}

pub trait MenuStore: Store<Menu> {}
impl<S: Store<Menu> + ?Sized> MenuStore for S {}

/// Next id for a collection: one past the largest, 1 when empty.
pub fn next_id<'a, R: Record>(records: impl IntoIterator<Item = &'a R>) -> u64 {
  records.into_iter().map(Record::id).max().unwrap_or(0) + 1
}

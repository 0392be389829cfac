// carta/src/store/memory.rs

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{event, instrument, Level};

use super::{next_id, Record, Store};
use crate::error::{CartaError, CartaResult};

/// In-process store backed by a vector, in insertion order.
///
/// Calls resolve immediately; no latency is simulated. The lock is never held
/// across an `.await` (there are none inside).
#[derive(Debug)]
pub struct MemoryStore<R: Record> {
  records: RwLock<Vec<R>>,
}

impl<R: Record> MemoryStore<R> {
  pub fn new() -> Self {
    Self::with_records(Vec::new())
  }

  /// Store pre-populated with `records`, e.g. the demo data in [`super::seed`].
  pub fn with_records(records: Vec<R>) -> Self {
    MemoryStore {
      records: RwLock::new(records),
    }
  }

  pub fn len(&self) -> usize {
    self.records.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.read().is_empty()
  }

  fn not_found(id: u64) -> CartaError {
    CartaError::NotFound { entity: R::ENTITY, id }
  }
}

impl<R: Record> Default for MemoryStore<R> {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl<R: Record> Store<R> for MemoryStore<R> {
  async fn get_all(&self) -> CartaResult<Vec<R>> {
    Ok(self.records.read().clone())
  }

  async fn get_by_id(&self, id: u64) -> CartaResult<R> {
    self
      .records
      .read()
      .iter()
      .find(|r| r.id() == id)
      .cloned()
      .ok_or_else(|| Self::not_found(id))
  }

  #[instrument(name = "MemoryStore::create", skip_all, fields(entity = R::ENTITY))]
  async fn create(&self, new: R::New) -> CartaResult<R> {
    let mut records = self.records.write();
    let record = R::from_new(next_id(records.iter()), new, Utc::now());
    records.push(record.clone());
    event!(Level::DEBUG, id = record.id(), "Record created.");
    Ok(record)
  }

  #[instrument(name = "MemoryStore::update", skip(self, patch), fields(entity = R::ENTITY))]
  async fn update(&self, id: u64, patch: R::Patch) -> CartaResult<R> {
    let mut records = self.records.write();
    let record = records
      .iter_mut()
      .find(|r| r.id() == id)
      .ok_or_else(|| Self::not_found(id))?;
    record.apply_patch(patch);
    Ok(record.clone())
  }

  #[instrument(name = "MemoryStore::delete", skip(self), fields(entity = R::ENTITY))]
  async fn delete(&self, id: u64) -> CartaResult<R> {
    let mut records = self.records.write();
    let index = records
      .iter()
      .position(|r| r.id() == id)
      .ok_or_else(|| Self::not_found(id))?;
    Ok(records.remove(index))
  }
}

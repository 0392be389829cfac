// carta/src/shared.rs
use parking_lot::{MappedRwLockReadGuard, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;

/// Shared ownership of a single mutable value behind a `parking_lot::RwLock`.
///
/// IMPORTANT: guards are blocking and MUST NOT be held across `.await` points.
/// Copy what you need out of the guard, drop it, then await.
#[derive(Debug)]
pub struct Shared<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> Shared<T> {
  pub fn new(value: T) -> Self {
    Shared(Arc::new(RwLock::new(value)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  pub fn try_read(&self) -> Option<RwLockReadGuard<'_, T>> {
    self.0.try_read()
  }

  pub fn try_write(&self) -> Option<RwLockWriteGuard<'_, T>> {
    self.0.try_write()
  }

  // e.g. shared.map_read(|session| &session.draft)
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&T) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }

  /// Runs `f` under the write lock and returns its result.
  pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
    f(&mut self.write())
  }
}

impl<T: Send + Sync + Clone + 'static> Shared<T> {
  /// Clones the current value out of the lock.
  pub fn snapshot(&self) -> T {
    self.read().clone()
  }
}

impl<T: Send + Sync + 'static> Clone for Shared<T> {
  fn clone(&self) -> Self {
    Shared(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + Default + 'static> Default for Shared<T> {
  fn default() -> Self {
    Self::new(T::default())
  }
}

/// One async lock per key, granted in arrival order (tokio's mutex is fair).
///
/// An entry exists only while some caller holds or waits on it.
pub struct KeyedLocks<K> {
  entries: Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
  pub fn new() -> Self {
    KeyedLocks {
      entries: Mutex::new(HashMap::new()),
    }
  }

  /// Runs `fut` once every earlier caller for `key` has finished.
  pub async fn serialize<F: Future>(&self, key: K, fut: F) -> F::Output {
    let turn = Turn {
      lock: Arc::clone(self.entries.lock().entry(key.clone()).or_default()),
      locks: self,
      key,
    };
    let _held = turn.lock.lock().await;
    fut.await
  }

  /// Keys currently held or waited on.
  pub fn len(&self) -> usize {
    self.entries.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.lock().is_empty()
  }
}

impl<K: Eq + Hash + Clone> Default for KeyedLocks<K> {
  fn default() -> Self {
    Self::new()
  }
}

impl<K> std::fmt::Debug for KeyedLocks<K> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("KeyedLocks")
      .field("keys", &self.entries.lock().len())
      .finish()
  }
}

// Releases the map entry on completion or when the waiting future is dropped.
struct Turn<'a, K: Eq + Hash> {
  locks: &'a KeyedLocks<K>,
  key: K,
  lock: Arc<AsyncMutex<()>>,
}

impl<K: Eq + Hash> Drop for Turn<'_, K> {
  fn drop(&mut self) {
    let mut entries = self.locks.entries.lock();
    // Map entry plus ours: nobody else is queued.
    if Arc::strong_count(&self.lock) == 2 {
      entries.remove(&self.key);
    }
  }
}

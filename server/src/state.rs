// carta_server/src/state.rs
use carta::{CheckoutWizard, TenantRegistry};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{event, Level};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};

struct OpenSession {
  wizard: Arc<CheckoutWizard>,
  last_seen: Instant,
}

/// Open checkout sessions by id.
///
/// A session lives until it is submitted, discarded by the client, or left
/// untouched for `idle_timeout`. Idle sessions are swept on every insert and
/// by the periodic task started in `main`.
pub struct CheckoutSessions {
  sessions: Mutex<HashMap<Uuid, OpenSession>>,
  idle_timeout: Duration,
}

impl CheckoutSessions {
  pub fn new(idle_timeout: Duration) -> Self {
    CheckoutSessions {
      sessions: Mutex::new(HashMap::new()),
      idle_timeout,
    }
  }

  pub fn insert(&self, wizard: CheckoutWizard) -> Arc<CheckoutWizard> {
    self.sweep_idle(Instant::now());
    let wizard = Arc::new(wizard);
    self.sessions.lock().insert(
      wizard.id(),
      OpenSession {
        wizard: wizard.clone(),
        last_seen: Instant::now(),
      },
    );
    wizard
  }

  /// The session must belong to `subdomain`; a session id presented under
  /// another tenant is reported as missing. A hit counts as activity.
  pub fn get(&self, subdomain: &str, id: Uuid) -> Result<Arc<CheckoutWizard>> {
    let mut sessions = self.sessions.lock();
    let open = sessions
      .get_mut(&id)
      .filter(|open| open.wizard.snapshot().tenant == subdomain)
      .ok_or(AppError::SessionNotFound(id))?;
    open.last_seen = Instant::now();
    Ok(open.wizard.clone())
  }

  pub fn remove(&self, id: Uuid) -> Option<Arc<CheckoutWizard>> {
    self.sessions.lock().remove(&id).map(|open| open.wizard)
  }

  /// Drops sessions idle for longer than the timeout as of `now`. A session
  /// with a submission in flight is kept. Returns how many were dropped.
  pub fn sweep_idle(&self, now: Instant) -> usize {
    let mut sessions = self.sessions.lock();
    let before = sessions.len();
    sessions.retain(|_, open| {
      open.wizard.snapshot().submitting || now.saturating_duration_since(open.last_seen) <= self.idle_timeout
    });
    let dropped = before - sessions.len();
    if dropped > 0 {
      event!(Level::DEBUG, dropped, open = sessions.len(), "Idle checkout sessions discarded.");
    }
    dropped
  }

  pub fn idle_timeout(&self) -> Duration {
    self.idle_timeout
  }

  pub fn len(&self) -> usize {
    self.sessions.lock().len()
  }
}

impl std::fmt::Debug for CheckoutSessions {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CheckoutSessions")
      .field("open", &self.len())
      .field("idle_timeout", &self.idle_timeout)
      .finish()
  }
}

#[derive(Clone)]
pub struct AppState {
  pub tenants: Arc<TenantRegistry>,
  pub sessions: Arc<CheckoutSessions>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  pub fn new(tenants: TenantRegistry, config: Arc<AppConfig>) -> Self {
    AppState {
      tenants: Arc::new(tenants),
      sessions: Arc::new(CheckoutSessions::new(config.checkout_idle_timeout)),
      config,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use carta::{LineItem, Tenant};

  fn open(sessions: &CheckoutSessions, tenant: &Tenant) -> Arc<CheckoutWizard> {
    let lines = vec![LineItem::new(1, "Tacos de Pastor", 8500, 1)];
    sessions.insert(tenant.start_checkout(lines).unwrap())
  }

  #[test]
  fn idle_sessions_are_swept() {
    let tenant = Tenant::demo("mi-restaurante");
    let sessions = CheckoutSessions::new(Duration::from_secs(60));
    let stale = open(&sessions, &tenant);
    let fresh = open(&sessions, &tenant);

    let t0 = Instant::now();
    assert_eq!(sessions.sweep_idle(t0 + Duration::from_secs(45)), 0);

    // A hit counts as activity.
    let seen = sessions.sessions.lock()[&fresh.id()].last_seen;
    sessions.get("mi-restaurante", fresh.id()).unwrap();
    assert!(sessions.sessions.lock()[&fresh.id()].last_seen >= seen);

    sessions.sessions.lock().get_mut(&fresh.id()).unwrap().last_seen = t0 + Duration::from_secs(40);
    assert_eq!(sessions.sweep_idle(t0 + Duration::from_secs(90)), 1);
    assert_eq!(sessions.len(), 1);
    assert!(matches!(
      sessions.get("mi-restaurante", stale.id()),
      Err(AppError::SessionNotFound(_))
    ));
    assert!(sessions.sessions.lock().contains_key(&fresh.id()));
  }

  #[test]
  fn wrong_tenant_is_missing() {
    let tenant = Tenant::demo("mi-restaurante");
    let sessions = CheckoutSessions::new(Duration::from_secs(60));
    let wizard = open(&sessions, &tenant);
    assert!(matches!(
      sessions.get("otro", wizard.id()),
      Err(AppError::SessionNotFound(_))
    ));
    assert!(sessions.remove(wizard.id()).is_some());
    assert_eq!(sessions.len(), 0);
  }
}

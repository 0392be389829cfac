// carta/src/notify.rs

//! Notification sink for the toasts the dashboard and public checkout show.

use std::fmt;
use tracing::{event, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
  Success,
  Error,
}

impl fmt::Display for NoticeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NoticeKind::Success => f.write_str("success"),
      NoticeKind::Error => f.write_str("error"),
    }
  }
}

/// Fire-and-forget. Implementations must not block and cannot fail.
pub trait Notifier: Send + Sync {
  fn notify(&self, kind: NoticeKind, message: &str);

  fn success(&self, message: &str) {
    self.notify(NoticeKind::Success, message);
  }

  fn error(&self, message: &str) {
    self.notify(NoticeKind::Error, message);
  }
}

/// Emits every notice as a tracing event under the given tenant.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier {
  tenant: String,
}

impl TracingNotifier {
  pub fn new(tenant: impl Into<String>) -> Self {
    TracingNotifier { tenant: tenant.into() }
  }
}

impl Notifier for TracingNotifier {
  fn notify(&self, kind: NoticeKind, message: &str) {
    match kind {
      NoticeKind::Success => event!(Level::INFO, tenant = %self.tenant, notice = %kind, "{}", message),
      NoticeKind::Error => event!(Level::WARN, tenant = %self.tenant, notice = %kind, "{}", message),
    }
  }
}

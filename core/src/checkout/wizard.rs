// carta/src/checkout/wizard.rs
use std::sync::Arc;
use tracing::{event, instrument, Instrument, Level, Span};
use uuid::Uuid;

use super::{CheckoutSession, CheckoutStep};
use crate::error::{CartaError, CartaResult};
use crate::model::{total_cents, LineItem, NewOrder, Order, OrderDraft};
use crate::notify::Notifier;
use crate::shared::Shared;
use crate::store::OrderStore;
use crate::validation::validate_line_items;

/// Drives one [`CheckoutSession`] over a fixed set of cart lines.
///
/// The session lives in a [`Shared`] cell; every operation takes the write
/// lock, swaps in the next value and releases the lock before awaiting the
/// store. `submit` sets the in-flight flag inside that same critical section,
/// so at most one submission reaches `OrderStore::create` at a time.
pub struct CheckoutWizard {
  session: Shared<CheckoutSession>,
  items: Vec<LineItem>,
  orders: Arc<dyn OrderStore>,
  notifier: Arc<dyn Notifier>,
}

impl CheckoutWizard {
  /// Opens a session on step 1. Fails with `EmptyCart` or `InvalidQuantity`.
  pub fn start(
    tenant: impl Into<String>,
    items: Vec<LineItem>,
    orders: Arc<dyn OrderStore>,
    notifier: Arc<dyn Notifier>,
  ) -> CartaResult<Self> {
    validate_line_items(&items)?;
    let session = CheckoutSession::new(tenant);
    event!(Level::DEBUG, session_id = %session.id, lines = items.len(), "Checkout session started.");
    Ok(CheckoutWizard {
      session: Shared::new(session),
      items,
      orders,
      notifier,
    })
  }

  pub fn id(&self) -> Uuid {
    self.session.read().id
  }

  pub fn snapshot(&self) -> CheckoutSession {
    self.session.snapshot()
  }

  pub fn step(&self) -> CheckoutStep {
    self.session.read().step
  }

  pub fn items(&self) -> &[LineItem] {
    &self.items
  }

  pub fn total_cents(&self) -> u64 {
    total_cents(&self.items)
  }

  pub fn update_draft(&self, draft: OrderDraft) -> CartaResult<CheckoutSession> {
    self.session.update(|session| -> CartaResult<CheckoutSession> {
      *session = session.with_draft(draft)?;
      Ok(session.clone())
    })
  }

  pub fn advance(&self) -> CartaResult<CheckoutSession> {
    self.session.update(|session| -> CartaResult<CheckoutSession> {
      *session = session.advance()?;
      Ok(session.clone())
    })
  }

  pub fn retreat(&self) -> CheckoutSession {
    self.session.update(|session| {
      *session = session.retreat();
      session.clone()
    })
  }

  /// Creates the order from the draft and cart lines.
  ///
  /// A second call while one is in flight fails with
  /// `SubmissionAlreadyInProgress` and touches nothing. A failed create keeps
  /// the draft so the customer can retry; each retry is a new create.
  ///
  /// The create runs on its own task: dropping this future does not cancel
  /// it, and the session still settles to `Submitted` or `SubmitFailed`.
  #[instrument(name = "CheckoutWizard::submit", skip(self), fields(session_id = %self.id()))]
  pub async fn submit(&self) -> CartaResult<Order> {
    let draft = self.session.update(|session| -> CartaResult<OrderDraft> {
      *session = session.begin_submit()?;
      Ok(session.draft.clone())
    })?;

    let placement = Placement {
      session: self.session.clone(),
      orders: Arc::clone(&self.orders),
      notifier: Arc::clone(&self.notifier),
    };
    let new_order = NewOrder::from_draft(&draft, self.items.clone());
    let task = tokio::spawn(placement.run(new_order).instrument(Span::current()));

    match task.await {
      Ok(result) => result,
      Err(join_error) => {
        event!(Level::ERROR, error = %join_error, "Order submission task aborted.");
        self.session.update(|session| {
          *session = session.finish_submit(Err(join_error.to_string()));
        });
        self.notifier.error("Error al procesar el pedido");
        Err(CartaError::Internal(format!("Order submission task aborted: {}", join_error)))
      }
    }
  }
}

// Owned handles for the detached create.
struct Placement {
  session: Shared<CheckoutSession>,
  orders: Arc<dyn OrderStore>,
  notifier: Arc<dyn Notifier>,
}

impl Placement {
  async fn run(self, new_order: NewOrder) -> CartaResult<Order> {
    let result = self.orders.create(new_order).await;

    self.session.update(|session| {
      let answer = result.as_ref().map(|order| order.id).map_err(|e| e.to_string());
      *session = session.finish_submit(answer);
    });

    match &result {
      Ok(order) => {
        event!(Level::INFO, order_id = order.id, total_cents = order.total_cents(), "Order placed.");
        self.notifier.success("¡Pedido realizado con éxito!");
      }
      Err(e) => {
        event!(Level::ERROR, error = %e, "Order submission failed.");
        self.notifier.error("Error al procesar el pedido");
      }
    }
    result
  }
}

impl std::fmt::Debug for CheckoutWizard {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CheckoutWizard")
      .field("session", &self.session)
      .field("items", &self.items)
      .finish_non_exhaustive()
  }
}

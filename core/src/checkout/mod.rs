// carta/src/checkout/mod.rs

//! Three-step public checkout: details, payment, review.
//!
//! [`CheckoutSession`] is a plain value with pure step functions; the
//! [`CheckoutWizard`] owns the single live copy and talks to the order store.

pub mod wizard;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CartaError, CartaResult};
use crate::model::OrderDraft;
use crate::validation::{validate_customer, validate_delivery};

pub use wizard::CheckoutWizard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CheckoutStep {
  Details = 1,
  Payment = 2,
  Review = 3,
}

impl CheckoutStep {
  pub fn number(self) -> u8 {
    self as u8
  }

  pub fn label(self) -> &'static str {
    match self {
      CheckoutStep::Details => "Datos de entrega",
      CheckoutStep::Payment => "Método de pago",
      CheckoutStep::Review => "Confirmar pedido",
    }
  }

  pub fn next(self) -> Option<CheckoutStep> {
    match self {
      CheckoutStep::Details => Some(CheckoutStep::Payment),
      CheckoutStep::Payment => Some(CheckoutStep::Review),
      CheckoutStep::Review => None,
    }
  }

  pub fn previous(self) -> Option<CheckoutStep> {
    match self {
      CheckoutStep::Details => None,
      CheckoutStep::Payment => Some(CheckoutStep::Details),
      CheckoutStep::Review => Some(CheckoutStep::Payment),
    }
  }
}

impl From<CheckoutStep> for u8 {
  fn from(step: CheckoutStep) -> u8 {
    step.number()
  }
}

impl TryFrom<u8> for CheckoutStep {
  type Error = String;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      1 => Ok(CheckoutStep::Details),
      2 => Ok(CheckoutStep::Payment),
      3 => Ok(CheckoutStep::Review),
      other => Err(format!("checkout step {} is outside 1..=3", other)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmitOutcome {
  #[default]
  Open,
  Submitted {
    order_id: u64,
  },
  SubmitFailed {
    reason: String,
  },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
  pub id: Uuid,
  pub tenant: String,
  pub step: CheckoutStep,
  pub draft: OrderDraft,
  pub submitting: bool,
  pub outcome: SubmitOutcome,
}

impl CheckoutSession {
  /// Step 1, home delivery, cash.
  pub fn new(tenant: impl Into<String>) -> Self {
    CheckoutSession {
      id: Uuid::new_v4(),
      tenant: tenant.into(),
      step: CheckoutStep::Details,
      draft: OrderDraft::default(),
      submitting: false,
      outcome: SubmitOutcome::Open,
    }
  }

  pub fn submitted_order(&self) -> Option<u64> {
    match self.outcome {
      SubmitOutcome::Submitted { order_id } => Some(order_id),
      _ => None,
    }
  }

  /// Errors when the session can no longer be edited.
  fn ensure_open(&self) -> CartaResult<()> {
    if let Some(order_id) = self.submitted_order() {
      return Err(CartaError::SessionClosed {
        session_id: self.id,
        order_id,
      });
    }
    if self.submitting {
      return Err(CartaError::SubmissionAlreadyInProgress { session_id: self.id });
    }
    Ok(())
  }

  fn check_details(&self) -> CartaResult<()> {
    validate_customer(&self.draft.customer)?;
    validate_delivery(self.draft.delivery_type, &self.draft.address)?;
    Ok(())
  }

  /// Moves one step forward if the current step's gate passes.
  pub fn advance(&self) -> CartaResult<CheckoutSession> {
    self.ensure_open()?;
    let next = match self.step {
      CheckoutStep::Details => {
        self.check_details()?;
        CheckoutStep::Payment
      }
      CheckoutStep::Payment => CheckoutStep::Review,
      CheckoutStep::Review => return Err(CartaError::AdvanceFromReview { session_id: self.id }),
    };
    Ok(CheckoutSession {
      step: next,
      ..self.clone()
    })
  }

  /// One step back. Never fails; unchanged on step 1 or once the session is
  /// submitted or submitting.
  pub fn retreat(&self) -> CheckoutSession {
    match (self.ensure_open(), self.step.previous()) {
      (Ok(()), Some(previous)) => CheckoutSession {
        step: previous,
        ..self.clone()
      },
      _ => self.clone(),
    }
  }

  pub fn with_draft(&self, draft: OrderDraft) -> CartaResult<CheckoutSession> {
    self.ensure_open()?;
    Ok(CheckoutSession {
      draft,
      ..self.clone()
    })
  }

  /// Marks the session as submitting. The details gate runs again since the
  /// draft may have been edited after step 1.
  pub fn begin_submit(&self) -> CartaResult<CheckoutSession> {
    self.ensure_open()?;
    if self.step != CheckoutStep::Review {
      return Err(CartaError::SubmitOutsideReview {
        session_id: self.id,
        step: self.step.number(),
      });
    }
    self.check_details()?;
    Ok(CheckoutSession {
      submitting: true,
      outcome: SubmitOutcome::Open,
      ..self.clone()
    })
  }

  /// Records the store's answer and clears the in-flight flag.
  pub fn finish_submit(&self, result: Result<u64, String>) -> CheckoutSession {
    let outcome = match result {
      Ok(order_id) => SubmitOutcome::Submitted { order_id },
      Err(reason) => SubmitOutcome::SubmitFailed { reason },
    };
    CheckoutSession {
      submitting: false,
      outcome,
      ..self.clone()
    }
  }
}

// carta/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;
use uuid::Uuid;

use crate::model::OrderStatus;
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum CartaError {
  #[error("Validation failed: {0}")]
  Validation(#[from] ValidationError),

  #[error("Illegal status transition for order {order_id}: {current} -> {requested}")]
  IllegalTransition {
    order_id: u64,
    current: OrderStatus,
    requested: OrderStatus,
  },

  #[error("{entity} {id} not found")]
  NotFound { entity: &'static str, id: u64 },

  #[error("Store operation on {entity} failed. Source: {source}")]
  Store {
    entity: &'static str,
    #[source]
    source: AnyhowError,
  },

  #[error("A submission is already in progress for checkout session {session_id}")]
  SubmissionAlreadyInProgress { session_id: Uuid },

  #[error("Checkout session {session_id} is on the review step; submit the order instead of advancing")]
  AdvanceFromReview { session_id: Uuid },

  #[error("Checkout session {session_id} can only be submitted from step 3 (currently on step {step})")]
  SubmitOutsideReview { session_id: Uuid, step: u8 },

  #[error("Checkout session {session_id} was already submitted as order {order_id}")]
  SessionClosed { session_id: Uuid, order_id: u64 },

  #[error("Review {review_id} already has a response")]
  AlreadyResponded { review_id: u64 },

  #[error("No establishment registered for subdomain '{subdomain}'")]
  UnknownTenant { subdomain: String },

  #[error("Error in an external collaborator. Source: {source}")]
  External {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal carta error: {0}")]
  Internal(String),
}

impl CartaError {
  /// Wraps a collaborator failure for the given record kind.
  pub fn store(entity: &'static str, source: impl Into<AnyhowError>) -> Self {
    CartaError::Store {
      entity,
      source: source.into(),
    }
  }

  /// User-correctable errors that block an operation without any side effect.
  pub fn is_user_correctable(&self) -> bool {
    matches!(
      self,
      CartaError::Validation(_) | CartaError::SubmissionAlreadyInProgress { .. }
    )
  }

  /// Message suitable for a toast in the dashboard or public checkout.
  pub fn user_message(&self) -> String {
    match self {
      CartaError::Validation(v) => v.user_message().to_string(),
      CartaError::IllegalTransition { requested, .. } => {
        format!("No es posible cambiar el pedido a {}", requested)
      }
      CartaError::NotFound { entity, .. } => format!("{} no encontrado", entity),
      CartaError::SubmissionAlreadyInProgress { .. } => "Tu pedido ya se está procesando".to_string(),
      CartaError::AlreadyResponded { .. } => "Esta reseña ya tiene una respuesta".to_string(),
      CartaError::UnknownTenant { .. } => "Establecimiento no encontrado".to_string(),
      CartaError::AdvanceFromReview { .. } | CartaError::SubmitOutsideReview { .. } => {
        "Completa los pasos anteriores del pedido".to_string()
      }
      CartaError::SessionClosed { .. } => "Este pedido ya fue enviado".to_string(),
      CartaError::Store { .. } | CartaError::External { .. } | CartaError::Internal(_) => {
        "Ocurrió un error, intenta de nuevo".to_string()
      }
    }
  }
}

// Opaque collaborator errors arrive as anyhow::Error; keep an existing
// CartaError intact instead of nesting it.
impl From<AnyhowError> for CartaError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<CartaError>() {
      Ok(carta_err) => carta_err,
      Err(err) => CartaError::External { source: err },
    }
  }
}

pub type CartaResult<T, E = CartaError> = std::result::Result<T, E>;

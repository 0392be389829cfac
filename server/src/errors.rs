// carta_server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use carta::CartaError;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Domain Error: {0}")]
  Carta(#[from] CartaError),

  #[error("Bad Request: {0}")]
  BadRequest(String),

  #[error("Checkout session {0} not found")]
  SessionNotFound(Uuid),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),
}

fn carta_status(err: &CartaError) -> StatusCode {
  match err {
    CartaError::Validation(_) => StatusCode::BAD_REQUEST,
    CartaError::NotFound { .. } | CartaError::UnknownTenant { .. } => StatusCode::NOT_FOUND,
    CartaError::IllegalTransition { .. }
    | CartaError::AlreadyResponded { .. }
    | CartaError::SubmissionAlreadyInProgress { .. }
    | CartaError::AdvanceFromReview { .. }
    | CartaError::SubmitOutsideReview { .. }
    | CartaError::SessionClosed { .. } => StatusCode::CONFLICT,
    CartaError::Store { .. } | CartaError::External { .. } | CartaError::Internal(_) => {
      StatusCode::INTERNAL_SERVER_ERROR
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Carta(e) => carta_status(e),
      AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    let status = self.status_code();
    match self {
      AppError::Carta(e) if status.is_server_error() => {
        HttpResponse::build(status).json(json!({"error": e.user_message()}))
      }
      AppError::Carta(e) => HttpResponse::build(status).json(json!({"error": e.user_message(), "detail": e.to_string()})),
      AppError::BadRequest(m) => HttpResponse::build(status).json(json!({"error": m})),
      AppError::SessionNotFound(_) => HttpResponse::build(status).json(json!({"error": "Sesión de pedido no encontrada"})),
      AppError::Config(m) => HttpResponse::build(status).json(json!({"error": "Configuration issue", "detail": m})),
      AppError::Sqlx(_) => HttpResponse::build(status).json(json!({"error": "Database operation failed"})),
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use carta::{OrderStatus, ValidationError};

  #[test]
  fn domain_errors_map_to_http_statuses() {
    let cases = [
      (CartaError::from(ValidationError::MissingAddress), StatusCode::BAD_REQUEST),
      (
        CartaError::UnknownTenant {
          subdomain: "x".to_string(),
        },
        StatusCode::NOT_FOUND,
      ),
      (
        CartaError::IllegalTransition {
          order_id: 1,
          current: OrderStatus::Pending,
          requested: OrderStatus::Delivered,
        },
        StatusCode::CONFLICT,
      ),
      (CartaError::store("Pedido", anyhow::anyhow!("down")), StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (err, expected) in cases {
      assert_eq!(AppError::from(err).status_code(), expected);
    }
  }

  #[test]
  fn server_errors_hide_the_detail() {
    let resp = AppError::from(CartaError::store("Pedido", anyhow::anyhow!("connection reset"))).error_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let resp = AppError::SessionNotFound(Uuid::nil()).error_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}

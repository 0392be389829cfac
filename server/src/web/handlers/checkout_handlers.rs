// carta_server/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use carta::money::format_cents;
use carta::{Cart, CartaError, CheckoutSession, CheckoutWizard, LineItem, Order, OrderDraft};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRequest {
  pub product_id: u64,
  pub quantity: u32,
}

#[derive(Deserialize, Debug)]
pub struct StartCheckoutRequest {
  pub items: Vec<CartLineRequest>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutView {
  pub session: CheckoutSession,
  pub items: Vec<LineItem>,
  pub total_cents: u64,
  pub total: String,
}

impl CheckoutView {
  fn of(wizard: &CheckoutWizard) -> Self {
    CheckoutView {
      session: wizard.snapshot(),
      items: wizard.items().to_vec(),
      total_cents: wizard.total_cents(),
      total: format_cents(wizard.total_cents()),
    }
  }
}

#[derive(Serialize, Debug)]
pub struct SubmittedView {
  pub order: Order,
  pub session: CheckoutSession,
}

fn session_of(app_state: &AppState, path: (String, Uuid)) -> Result<Arc<CheckoutWizard>, AppError> {
  let (subdomain, session_id) = path;
  app_state.tenants.get(&subdomain)?;
  app_state.sessions.get(&subdomain, session_id)
}

/// Prices and names are taken from the tenant's catalog, never from the request.
#[instrument(name = "handler::start_checkout", skip(app_state, body))]
pub async fn start_checkout_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  body: web::Json<StartCheckoutRequest>,
) -> Result<HttpResponse, AppError> {
  let subdomain = path.into_inner();
  let tenant = app_state.tenants.get(&subdomain)?;
  let catalog = tenant.catalog();

  let mut cart = Cart::new();
  for line in &body.items {
    let product = catalog.get(line.product_id).await?;
    cart.add_product(&product, line.quantity).map_err(CartaError::from)?;
  }

  let wizard = app_state.sessions.insert(tenant.start_checkout(cart.into_lines())?);
  info!(session_id = %wizard.id(), "Checkout session opened.");
  Ok(HttpResponse::Created().json(CheckoutView::of(&wizard)))
}

#[instrument(name = "handler::get_checkout", skip(app_state))]
pub async fn get_checkout_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse, AppError> {
  let wizard = session_of(&app_state, path.into_inner())?;
  Ok(HttpResponse::Ok().json(CheckoutView::of(&wizard)))
}

#[instrument(name = "handler::update_checkout_draft", skip(app_state, body))]
pub async fn update_draft_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, Uuid)>,
  body: web::Json<OrderDraft>,
) -> Result<HttpResponse, AppError> {
  let wizard = session_of(&app_state, path.into_inner())?;
  wizard.update_draft(body.into_inner())?;
  Ok(HttpResponse::Ok().json(CheckoutView::of(&wizard)))
}

#[instrument(name = "handler::advance_checkout", skip(app_state))]
pub async fn advance_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse, AppError> {
  let wizard = session_of(&app_state, path.into_inner())?;
  wizard.advance()?;
  Ok(HttpResponse::Ok().json(CheckoutView::of(&wizard)))
}

#[instrument(name = "handler::retreat_checkout", skip(app_state))]
pub async fn retreat_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse, AppError> {
  let wizard = session_of(&app_state, path.into_inner())?;
  wizard.retreat();
  Ok(HttpResponse::Ok().json(CheckoutView::of(&wizard)))
}

/// The customer left the checkout; the session is forgotten. A submission
/// already in flight still completes.
#[instrument(name = "handler::discard_checkout", skip(app_state))]
pub async fn discard_checkout_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse, AppError> {
  let wizard = session_of(&app_state, path.into_inner())?;
  app_state.sessions.remove(wizard.id());
  info!(session_id = %wizard.id(), "Checkout session discarded.");
  Ok(HttpResponse::NoContent().finish())
}

/// On success the session is closed and forgotten.
#[instrument(name = "handler::submit_checkout", skip(app_state))]
pub async fn submit_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse, AppError> {
  let wizard = session_of(&app_state, path.into_inner())?;
  let order = wizard.submit().await?;
  app_state.sessions.remove(wizard.id());
  info!(order_id = order.id, "Checkout submitted.");
  Ok(HttpResponse::Created().json(SubmittedView {
    order,
    session: wizard.snapshot(),
  }))
}

// carta_server/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use carta::{OrderFilter, OrderStatus};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug, Default)]
pub struct ListOrdersQuery {
  pub q: Option<String>,
  /// Wire name (`listo`) or `all`.
  pub status: Option<String>,
}

impl ListOrdersQuery {
  fn into_filter(self) -> Result<OrderFilter, AppError> {
    let status = match self.status.as_deref().map(str::trim) {
      None | Some("") | Some("all") => None,
      Some(name) => Some(
        OrderStatus::parse(name).ok_or_else(|| AppError::BadRequest(format!("Unknown order status '{}'", name)))?,
      ),
    };
    Ok(OrderFilter { search: self.q, status })
  }
}

#[derive(Deserialize, Debug)]
pub struct SetStatusRequest {
  pub status: OrderStatus,
}

#[instrument(name = "handler::list_orders", skip(app_state, query))]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  query: web::Query<ListOrdersQuery>,
) -> Result<HttpResponse, AppError> {
  let tenant = app_state.tenants.get(&path.into_inner())?;
  let orders = tenant.order_board().list(&query.into_inner().into_filter()?).await?;
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::get_order", skip(app_state))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, u64)>,
) -> Result<HttpResponse, AppError> {
  let (subdomain, order_id) = path.into_inner();
  let tenant = app_state.tenants.get(&subdomain)?;
  Ok(HttpResponse::Ok().json(tenant.order_board().get(order_id).await?))
}

#[instrument(name = "handler::set_order_status", skip(app_state, body), fields(target = ?body.status))]
pub async fn set_order_status_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, u64)>,
  body: web::Json<SetStatusRequest>,
) -> Result<HttpResponse, AppError> {
  let (subdomain, order_id) = path.into_inner();
  let tenant = app_state.tenants.get(&subdomain)?;
  let order = tenant.order_board().set_status(order_id, body.status).await?;
  info!(order_id, status = %order.status, "Order status changed.");
  Ok(HttpResponse::Ok().json(order))
}

#[instrument(name = "handler::delete_order", skip(app_state))]
pub async fn delete_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, u64)>,
) -> Result<HttpResponse, AppError> {
  let (subdomain, order_id) = path.into_inner();
  let tenant = app_state.tenants.get(&subdomain)?;
  let removed = tenant.order_board().delete(order_id).await?;
  Ok(HttpResponse::Ok().json(removed))
}

#[instrument(name = "handler::list_customers", skip(app_state))]
pub async fn list_customers_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let tenant = app_state.tenants.get(&path.into_inner())?;
  Ok(HttpResponse::Ok().json(tenant.order_board().customers().await?))
}

// carta_server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use carta::{MenuDraft, MenuQuery, ProductDraft};
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::list_products", skip(app_state, query))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  query: web::Query<MenuQuery>,
) -> Result<HttpResponse, AppError> {
  let tenant = app_state.tenants.get(&path.into_inner())?;
  Ok(HttpResponse::Ok().json(tenant.catalog().list(&query).await?))
}

#[instrument(name = "handler::create_product", skip(app_state, body))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  body: web::Json<ProductDraft>,
) -> Result<HttpResponse, AppError> {
  let tenant = app_state.tenants.get(&path.into_inner())?;
  let product = tenant.catalog().create(&body).await?;
  Ok(HttpResponse::Created().json(product))
}

#[instrument(name = "handler::update_product", skip(app_state, body))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, u64)>,
  body: web::Json<ProductDraft>,
) -> Result<HttpResponse, AppError> {
  let (subdomain, product_id) = path.into_inner();
  let tenant = app_state.tenants.get(&subdomain)?;
  Ok(HttpResponse::Ok().json(tenant.catalog().update(product_id, &body).await?))
}

#[instrument(name = "handler::delete_product", skip(app_state))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, u64)>,
) -> Result<HttpResponse, AppError> {
  let (subdomain, product_id) = path.into_inner();
  let tenant = app_state.tenants.get(&subdomain)?;
  Ok(HttpResponse::Ok().json(tenant.catalog().delete(product_id).await?))
}

#[instrument(name = "handler::toggle_product_availability", skip(app_state))]
pub async fn toggle_availability_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, u64)>,
) -> Result<HttpResponse, AppError> {
  let (subdomain, product_id) = path.into_inner();
  let tenant = app_state.tenants.get(&subdomain)?;
  Ok(HttpResponse::Ok().json(tenant.catalog().toggle_availability(product_id).await?))
}

#[instrument(name = "handler::list_menus", skip(app_state))]
pub async fn list_menus_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let tenant = app_state.tenants.get(&path.into_inner())?;
  Ok(HttpResponse::Ok().json(tenant.catalog().menus().await?))
}

/// New menus belong to the establishment named in the path.
#[instrument(name = "handler::create_menu", skip(app_state, body))]
pub async fn create_menu_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  body: web::Json<MenuDraft>,
) -> Result<HttpResponse, AppError> {
  let tenant = app_state.tenants.get(&path.into_inner())?;
  let menu = tenant.catalog().create_menu(tenant.subdomain(), &body).await?;
  Ok(HttpResponse::Created().json(menu))
}

#[instrument(name = "handler::update_menu", skip(app_state, body))]
pub async fn update_menu_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, u64)>,
  body: web::Json<MenuDraft>,
) -> Result<HttpResponse, AppError> {
  let (subdomain, menu_id) = path.into_inner();
  let tenant = app_state.tenants.get(&subdomain)?;
  Ok(HttpResponse::Ok().json(tenant.catalog().update_menu(menu_id, &body).await?))
}

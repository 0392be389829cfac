// carta_server/src/web/handlers/menu_handlers.rs

use actix_web::{web, HttpResponse};
use carta::MenuQuery;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::public_menu", skip(app_state, query))]
pub async fn public_menu_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  query: web::Query<MenuQuery>,
) -> Result<HttpResponse, AppError> {
  let subdomain = path.into_inner();
  let tenant = app_state.tenants.get(&subdomain)?;

  let mut query = query.into_inner();
  query.only_available = true;
  let menu = tenant.catalog().public_menu(&subdomain, &query).await?;
  info!("Public menu served with {} products.", menu.products.len());
  Ok(HttpResponse::Ok().json(menu))
}

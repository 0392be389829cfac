// carta_server/src/web/handlers/review_handlers.rs

use actix_web::{web, HttpResponse};
use carta::ReviewFilter;
use serde::Deserialize;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct ListReviewsQuery {
  pub q: Option<String>,
  /// 1..=5 or `all`.
  pub rating: Option<String>,
}

impl ListReviewsQuery {
  fn into_filter(self) -> Result<ReviewFilter, AppError> {
    let rating = match self.rating.as_deref().map(str::trim) {
      None | Some("") | Some("all") => None,
      Some(raw) => Some(
        raw
          .parse::<u8>()
          .map_err(|_| AppError::BadRequest(format!("Invalid rating filter '{}'", raw)))?,
      ),
    };
    Ok(ReviewFilter { search: self.q, rating })
  }
}

#[derive(Deserialize, Debug)]
pub struct RespondRequest {
  pub response: String,
}

#[instrument(name = "handler::list_reviews", skip(app_state, query))]
pub async fn list_reviews_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  query: web::Query<ListReviewsQuery>,
) -> Result<HttpResponse, AppError> {
  let tenant = app_state.tenants.get(&path.into_inner())?;
  let reviews = tenant.review_desk().list(&query.into_inner().into_filter()?).await?;
  Ok(HttpResponse::Ok().json(reviews))
}

#[instrument(name = "handler::review_stats", skip(app_state))]
pub async fn review_stats_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let tenant = app_state.tenants.get(&path.into_inner())?;
  Ok(HttpResponse::Ok().json(tenant.review_desk().stats().await?))
}

#[instrument(name = "handler::respond_review", skip(app_state, body))]
pub async fn respond_review_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, u64)>,
  body: web::Json<RespondRequest>,
) -> Result<HttpResponse, AppError> {
  let (subdomain, review_id) = path.into_inner();
  let tenant = app_state.tenants.get(&subdomain)?;
  let review = tenant.review_desk().respond(review_id, &body.response).await?;
  Ok(HttpResponse::Ok().json(review))
}

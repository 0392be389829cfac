// carta_server/src/main.rs

mod config;
mod errors;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting carta server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::other(e.to_string()));
    }
  };

  let db_pool = match &app_config.database_url {
    Some(url) => match PgPool::connect(url).await {
      Ok(pool) => {
        tracing::info!("Successfully connected to the database.");
        Some(pool)
      }
      Err(e) => {
        tracing::error!(error = %e, "Failed to connect to the database.");
        return Err(std::io::Error::other(e.to_string()));
      }
    },
    None => {
      tracing::warn!("DATABASE_URL not set; orders, reviews and products are kept in memory.");
      None
    }
  };

  let registry = match services::tenants::build_registry(&app_config, db_pool.as_ref()).await {
    Ok(registry) => registry,
    Err(e) => {
      tracing::error!(error = %e, "Failed to prepare tenants.");
      return Err(std::io::Error::other(e.to_string()));
    }
  };
  let app_state = AppState::new(registry, app_config.clone());

  let sessions = app_state.sessions.clone();
  tokio::spawn(async move {
    let mut ticks = tokio::time::interval(sessions.idle_timeout() / 4);
    loop {
      ticks.tick().await;
      sessions.sweep_idle(std::time::Instant::now());
    }
  });

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}

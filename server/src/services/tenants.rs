// carta_server/src/services/tenants.rs

use carta::store::seed::{demo_menus, demo_orders, demo_products, demo_reviews};
use carta::{Menu, Order, Product, Review, Tenant, TenantRegistry, TenantStores, TracingNotifier};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, instrument};

use super::pg_store::{ensure_schema, PgStore};
use crate::config::AppConfig;
use crate::errors::Result;

/// One tenant per configured subdomain, backed by Postgres when a pool is
/// given and by memory otherwise.
#[instrument(name = "tenants::build_registry", skip_all, fields(postgres = pool.is_some()))]
pub async fn build_registry(config: &AppConfig, pool: Option<&PgPool>) -> Result<TenantRegistry> {
  if let Some(pool) = pool {
    ensure_schema(pool).await?;
  }

  let registry = TenantRegistry::new();
  for subdomain in &config.tenants {
    let stores = match pool {
      Some(pool) => postgres_stores(pool, subdomain, config.seed_demo_data).await?,
      None if config.seed_demo_data => TenantStores::demo(),
      None => TenantStores::in_memory(),
    };
    let notifier = Arc::new(TracingNotifier::new(subdomain.clone()));
    registry.register(Tenant::new(subdomain.clone(), stores, notifier));
    info!(%subdomain, menu_url = %config.menu_url(subdomain), "Tenant ready.");
  }
  Ok(registry)
}

async fn postgres_stores(pool: &PgPool, subdomain: &str, seed: bool) -> Result<TenantStores> {
  let orders = PgStore::<Order>::new(pool.clone(), subdomain);
  let reviews = PgStore::<Review>::new(pool.clone(), subdomain);
  let products = PgStore::<Product>::new(pool.clone(), subdomain);
  let menus = PgStore::<Menu>::new(pool.clone(), subdomain);

  if seed {
    products.seed_if_empty(demo_products()).await?;
    menus.seed_if_empty(demo_menus()).await?;
    orders.seed_if_empty(demo_orders()).await?;
    reviews.seed_if_empty(demo_reviews()).await?;
  }

  Ok(TenantStores {
    orders: Arc::new(orders),
    reviews: Arc::new(reviews),
    products: Arc::new(products),
    menus: Arc::new(menus),
  })
}

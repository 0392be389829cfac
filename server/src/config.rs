// carta_server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// Postgres stores when set, in-memory stores otherwise.
  pub database_url: Option<String>,
  pub app_base_url: String,
  /// Subdomains served by this instance.
  pub tenants: Vec<String>,
  /// Load the demo menu, orders and reviews into empty tenants.
  pub seed_demo_data: bool,
  /// Open checkout sessions untouched for this long are discarded.
  pub checkout_idle_timeout: Duration,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    let config = Self::from_lookup(|name| env::var(name).ok())?;
    tracing::info!(
      tenants = ?config.tenants,
      postgres = config.database_url.is_some(),
      "Application configuration loaded successfully."
    );
    Ok(config)
  }

  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| lookup(var_name).filter(|v| !v.trim().is_empty());

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL");
    let app_base_url = get_env("APP_BASE_URL").unwrap_or_else(|| format!("http://{}:{}", server_host, server_port));

    let tenants: Vec<String> = get_env("TENANTS")
      .unwrap_or_else(|| carta::store::seed::DEMO_SUBDOMAIN.to_string())
      .split(',')
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(str::to_string)
      .collect();
    if tenants.is_empty() {
      return Err(AppError::Config("TENANTS must name at least one subdomain".to_string()));
    }

    let seed_demo_data = get_env("SEED_DEMO_DATA")
      .unwrap_or_else(|| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DEMO_DATA value: {}", e)))?;

    let checkout_idle_secs = get_env("CHECKOUT_IDLE_SECS")
      .unwrap_or_else(|| "1800".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid CHECKOUT_IDLE_SECS: {}", e)))?;
    if checkout_idle_secs == 0 {
      return Err(AppError::Config("CHECKOUT_IDLE_SECS must be positive".to_string()));
    }

    Ok(Self {
      server_host,
      server_port,
      database_url,
      app_base_url,
      tenants,
      seed_demo_data,
      checkout_idle_timeout: Duration::from_secs(checkout_idle_secs),
    })
  }

  /// Public menu address of a tenant, e.g. `http://127.0.0.1:8080/menu/mi-restaurante`.
  pub fn menu_url(&self, subdomain: &str) -> String {
    format!("{}/menu/{}", self.app_base_url.trim_end_matches('/'), subdomain)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| vars.get(name).cloned()
  }

  #[test]
  fn defaults() {
    let config = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.server_port, 8080);
    assert_eq!(config.database_url, None);
    assert_eq!(config.tenants, vec!["mi-restaurante"]);
    assert!(config.seed_demo_data);
    assert_eq!(config.checkout_idle_timeout, Duration::from_secs(1800));
    assert_eq!(config.menu_url("mi-restaurante"), "http://127.0.0.1:8080/menu/mi-restaurante");
  }

  #[test]
  fn tenant_list_and_invalid_values() {
    let config = AppConfig::from_lookup(lookup(&[("TENANTS", " cafe-azul, ,tacos-el-gordo ")])).unwrap();
    assert_eq!(config.tenants, vec!["cafe-azul", "tacos-el-gordo"]);

    assert!(matches!(
      AppConfig::from_lookup(lookup(&[("SERVER_PORT", "80a")])),
      Err(AppError::Config(_))
    ));
    assert!(matches!(
      AppConfig::from_lookup(lookup(&[("TENANTS", " , ")])),
      Err(AppError::Config(_))
    ));
    assert!(matches!(
      AppConfig::from_lookup(lookup(&[("SEED_DEMO_DATA", "yes")])),
      Err(AppError::Config(_))
    ));
    assert!(matches!(
      AppConfig::from_lookup(lookup(&[("CHECKOUT_IDLE_SECS", "0")])),
      Err(AppError::Config(_))
    ));
  }
}

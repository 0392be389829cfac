// carta/src/tenant.rs

//! Establishments keyed by subdomain.
//!
//! The subdomain is an opaque key: it is compared verbatim and never parsed.
//! Each [`Tenant`] bundles its own stores, notifier and status machine, so
//! orders of different establishments never share a lock or a collection.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::catalog::Catalog;
use crate::checkout::CheckoutWizard;
use crate::error::{CartaError, CartaResult};
use crate::model::LineItem;
use crate::notify::{Notifier, TracingNotifier};
use crate::orders::OrderBoard;
use crate::reviews::ReviewDesk;
use crate::status::OrderStatusMachine;
use crate::store::seed::{demo_menus, demo_orders, demo_products, demo_reviews};
use crate::store::{MemoryStore, MenuStore, OrderStore, ProductStore, ReviewStore};

/// The four collections an establishment owns.
#[derive(Clone)]
pub struct TenantStores {
  pub orders: Arc<dyn OrderStore>,
  pub reviews: Arc<dyn ReviewStore>,
  pub products: Arc<dyn ProductStore>,
  pub menus: Arc<dyn MenuStore>,
}

impl TenantStores {
  pub fn in_memory() -> Self {
    TenantStores {
      orders: Arc::new(MemoryStore::new()),
      reviews: Arc::new(MemoryStore::new()),
      products: Arc::new(MemoryStore::new()),
      menus: Arc::new(MemoryStore::new()),
    }
  }

  /// In-memory stores holding the demo orders, reviews, products and menus.
  pub fn demo() -> Self {
    TenantStores {
      orders: Arc::new(MemoryStore::with_records(demo_orders())),
      reviews: Arc::new(MemoryStore::with_records(demo_reviews())),
      products: Arc::new(MemoryStore::with_records(demo_products())),
      menus: Arc::new(MemoryStore::with_records(demo_menus())),
    }
  }
}

pub struct Tenant {
  subdomain: String,
  stores: TenantStores,
  notifier: Arc<dyn Notifier>,
  status_machine: Arc<OrderStatusMachine>,
  review_desk: ReviewDesk,
}

impl Tenant {
  pub fn new(subdomain: impl Into<String>, stores: TenantStores, notifier: Arc<dyn Notifier>) -> Self {
    let status_machine = Arc::new(OrderStatusMachine::new(stores.orders.clone(), notifier.clone()));
    let review_desk = ReviewDesk::new(stores.reviews.clone(), notifier.clone());
    Tenant {
      subdomain: subdomain.into(),
      stores,
      notifier,
      status_machine,
      review_desk,
    }
  }

  /// Empty in-memory tenant that logs its notices.
  pub fn in_memory(subdomain: impl Into<String>) -> Self {
    let subdomain = subdomain.into();
    let notifier = Arc::new(TracingNotifier::new(subdomain.clone()));
    Self::new(subdomain, TenantStores::in_memory(), notifier)
  }

  /// In-memory tenant seeded with the demo data.
  pub fn demo(subdomain: impl Into<String>) -> Self {
    let subdomain = subdomain.into();
    let notifier = Arc::new(TracingNotifier::new(subdomain.clone()));
    Self::new(subdomain, TenantStores::demo(), notifier)
  }

  pub fn subdomain(&self) -> &str {
    &self.subdomain
  }

  pub fn stores(&self) -> &TenantStores {
    &self.stores
  }

  pub fn notifier(&self) -> Arc<dyn Notifier> {
    self.notifier.clone()
  }

  pub fn status_machine(&self) -> &OrderStatusMachine {
    &self.status_machine
  }

  pub fn order_board(&self) -> OrderBoard {
    OrderBoard::new(self.stores.orders.clone(), self.status_machine.clone())
  }

  pub fn catalog(&self) -> Catalog {
    Catalog::new(
      self.stores.products.clone(),
      self.stores.menus.clone(),
      self.notifier.clone(),
    )
  }

  pub fn review_desk(&self) -> &ReviewDesk {
    &self.review_desk
  }

  pub fn start_checkout(&self, items: Vec<LineItem>) -> CartaResult<CheckoutWizard> {
    CheckoutWizard::start(
      self.subdomain.clone(),
      items,
      self.stores.orders.clone(),
      self.notifier.clone(),
    )
  }
}

impl std::fmt::Debug for Tenant {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Tenant")
      .field("subdomain", &self.subdomain)
      .finish_non_exhaustive()
  }
}

#[derive(Debug, Default)]
pub struct TenantRegistry {
  tenants: RwLock<HashMap<String, Arc<Tenant>>>,
}

impl TenantRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `tenant`, replacing any previous one under the same subdomain.
  #[instrument(name = "TenantRegistry::register", skip_all, fields(subdomain = %tenant.subdomain()))]
  pub fn register(&self, tenant: Tenant) -> Arc<Tenant> {
    let tenant = Arc::new(tenant);
    let previous = self
      .tenants
      .write()
      .insert(tenant.subdomain().to_string(), tenant.clone());
    if previous.is_some() {
      event!(Level::WARN, "Tenant replaced an existing registration.");
    } else {
      event!(Level::DEBUG, "Tenant registered.");
    }
    tenant
  }

  pub fn get(&self, subdomain: &str) -> CartaResult<Arc<Tenant>> {
    self
      .tenants
      .read()
      .get(subdomain)
      .cloned()
      .ok_or_else(|| CartaError::UnknownTenant {
        subdomain: subdomain.to_string(),
      })
  }

  pub fn contains(&self, subdomain: &str) -> bool {
    self.tenants.read().contains_key(subdomain)
  }

  /// Registered subdomains, sorted.
  pub fn subdomains(&self) -> Vec<String> {
    let mut names: Vec<String> = self.tenants.read().keys().cloned().collect();
    names.sort();
    names
  }
}

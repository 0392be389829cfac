// carta/src/catalog.rs

//! Products and menus of an establishment, for the dashboard and the public
//! menu.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::error::{CartaError, CartaResult};
use crate::model::{Menu, MenuDraft, MenuPatch, NewMenu, NewProduct, Product, ProductDraft, ProductPatch};
use crate::notify::Notifier;
use crate::store::{MenuStore, ProductStore, Record};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MenuQuery {
  /// Case-insensitive match on name or description.
  #[serde(default, alias = "q")]
  pub search: Option<String>,
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub only_available: bool,
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
  haystack.to_lowercase().contains(needle_lower)
}

pub fn filter_products(products: &[Product], query: &MenuQuery) -> Vec<Product> {
  let search = query
    .search
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_lowercase);
  let category = query.category.as_deref().filter(|c| !c.is_empty() && *c != "all");

  products
    .iter()
    .filter(|p| !query.only_available || p.available)
    .filter(|p| match &search {
      Some(s) => contains_ci(&p.name, s) || contains_ci(&p.description, s),
      None => true,
    })
    .filter(|p| category.map_or(true, |c| p.category == c))
    .cloned()
    .collect()
}

/// Distinct non-empty categories in first-seen order.
pub fn categories(products: &[Product]) -> Vec<String> {
  let mut seen: Vec<String> = Vec::new();
  for product in products {
    if !product.category.is_empty() && !seen.contains(&product.category) {
      seen.push(product.category.clone());
    }
  }
  seen
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicMenu {
  pub establishment: String,
  pub categories: Vec<String>,
  pub products: Vec<Product>,
}

pub struct Catalog {
  products: Arc<dyn ProductStore>,
  menus: Arc<dyn MenuStore>,
  notifier: Arc<dyn Notifier>,
}

impl Catalog {
  pub fn new(products: Arc<dyn ProductStore>, menus: Arc<dyn MenuStore>, notifier: Arc<dyn Notifier>) -> Self {
    Catalog {
      products,
      menus,
      notifier,
    }
  }

  pub async fn list(&self, query: &MenuQuery) -> CartaResult<Vec<Product>> {
    let products = self.products.get_all().await?;
    Ok(filter_products(&products, query))
  }

  pub async fn get(&self, id: u64) -> CartaResult<Product> {
    self.products.get_by_id(id).await
  }

  /// Available products only; categories are those of the available
  /// products, before the query's own category filter.
  pub async fn public_menu(&self, establishment: &str, query: &MenuQuery) -> CartaResult<PublicMenu> {
    let available: Vec<Product> = self
      .products
      .get_all()
      .await?
      .into_iter()
      .filter(|p| p.available)
      .collect();
    Ok(PublicMenu {
      establishment: establishment.to_string(),
      categories: categories(&available),
      products: filter_products(&available, query),
    })
  }

  pub async fn menus(&self) -> CartaResult<Vec<Menu>> {
    self.menus.get_all().await
  }

  #[instrument(name = "Catalog::create_menu", skip(self, draft))]
  pub async fn create_menu(&self, establishment: &str, draft: &MenuDraft) -> CartaResult<Menu> {
    let result = self.create_menu_checked(establishment, draft).await;
    self.report(&result, "Menú creado exitosamente", "Error al guardar el menú");
    result
  }

  #[instrument(name = "Catalog::update_menu", skip(self, draft))]
  pub async fn update_menu(&self, id: u64, draft: &MenuDraft) -> CartaResult<Menu> {
    let result = self.update_menu_checked(id, draft).await;
    self.report(&result, "Menú actualizado exitosamente", "Error al guardar el menú");
    result
  }

  #[instrument(name = "Catalog::create", skip_all, fields(name = %draft.name))]
  pub async fn create(&self, draft: &ProductDraft) -> CartaResult<Product> {
    let result = self.create_checked(draft).await;
    self.report(&result, "Producto creado exitosamente", "Error al guardar el producto");
    result
  }

  #[instrument(name = "Catalog::update", skip(self, draft))]
  pub async fn update(&self, id: u64, draft: &ProductDraft) -> CartaResult<Product> {
    let result = self.update_checked(id, draft).await;
    self.report(&result, "Producto actualizado exitosamente", "Error al guardar el producto");
    result
  }

  #[instrument(name = "Catalog::toggle_availability", skip(self))]
  pub async fn toggle_availability(&self, id: u64) -> CartaResult<Product> {
    let result = self.flip_availability(id).await;
    match &result {
      Ok(product) if product.available => self.notifier.success("Producto habilitado"),
      Ok(_) => self.notifier.success("Producto deshabilitado"),
      Err(_) => self.notifier.error("Error al actualizar el producto"),
    }
    result
  }

  #[instrument(name = "Catalog::delete", skip(self))]
  pub async fn delete(&self, id: u64) -> CartaResult<Product> {
    let result = self.products.delete(id).await;
    self.report(&result, "Producto eliminado exitosamente", "Error al eliminar el producto");
    result
  }

  async fn create_checked(&self, draft: &ProductDraft) -> CartaResult<Product> {
    let new = NewProduct::try_from(draft)?;
    self.products.create(new).await
  }

  async fn update_checked(&self, id: u64, draft: &ProductDraft) -> CartaResult<Product> {
    let patch = ProductPatch {
      details: Some(NewProduct::try_from(draft)?),
      available: None,
    };
    self.products.update(id, patch).await
  }

  async fn create_menu_checked(&self, establishment: &str, draft: &MenuDraft) -> CartaResult<Menu> {
    let new = NewMenu::from_draft(draft, establishment)?;
    self.menus.create(new).await
  }

  async fn update_menu_checked(&self, id: u64, draft: &MenuDraft) -> CartaResult<Menu> {
    let patch = MenuPatch::try_from(draft)?;
    self.menus.update(id, patch).await
  }

  async fn flip_availability(&self, id: u64) -> CartaResult<Product> {
    let current = self.products.get_by_id(id).await?;
    let patch = ProductPatch {
      details: None,
      available: Some(!current.available),
    };
    self.products.update(id, patch).await
  }

  // Validation failures show the gate's own message; anything else the
  // generic one.
  fn report<R: Record>(&self, result: &CartaResult<R>, success: &str, failure: &str) {
    match result {
      Ok(record) => {
        event!(Level::DEBUG, entity = R::ENTITY, id = record.id(), "{}", success);
        self.notifier.success(success);
      }
      Err(CartaError::Validation(v)) => self.notifier.error(v.user_message()),
      Err(e) => {
        event!(Level::WARN, error = %e, "{}", failure);
        self.notifier.error(failure);
      }
    }
  }
}

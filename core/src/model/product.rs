// carta/src/model/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::parse_price_cents;
use crate::store::Record;
use crate::validation::{validate_product, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  pub id: u64,
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub price_cents: u64,
  pub category: String,
  #[serde(default)]
  pub image_url: String,
  pub available: bool,
  pub created_at: DateTime<Utc>,
}

/// Raw product form as typed in the dashboard; `price` is unparsed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub price: String,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub image_url: String,
  #[serde(default = "available_by_default")]
  pub available: bool,
}

fn available_by_default() -> bool {
  true
}

impl Default for ProductDraft {
  fn default() -> Self {
    ProductDraft {
      name: String::new(),
      description: String::new(),
      price: String::new(),
      category: String::new(),
      image_url: String::new(),
      available: true,
    }
  }
}

/// A product that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
  pub name: String,
  pub description: String,
  pub price_cents: u64,
  pub category: String,
  pub image_url: String,
  pub available: bool,
}

impl TryFrom<&ProductDraft> for NewProduct {
  type Error = ValidationError;

  fn try_from(draft: &ProductDraft) -> Result<Self, Self::Error> {
    validate_product(draft)?;
    let price_cents = parse_price_cents(&draft.price).ok_or_else(|| ValidationError::InvalidPrice {
      input: draft.price.clone(),
    })?;
    Ok(NewProduct {
      name: draft.name.trim().to_string(),
      description: draft.description.trim().to_string(),
      price_cents,
      category: draft.category.clone(),
      image_url: draft.image_url.trim().to_string(),
      available: draft.available,
    })
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
  pub details: Option<NewProduct>,
  pub available: Option<bool>,
}

impl Record for Product {
  type New = NewProduct;
  type Patch = ProductPatch;
  const ENTITY: &'static str = "Producto";

  fn id(&self) -> u64 {
    self.id
  }

  fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  fn from_new(id: u64, new: NewProduct, now: DateTime<Utc>) -> Self {
    Product {
      id,
      name: new.name,
      description: new.description,
      price_cents: new.price_cents,
      category: new.category,
      image_url: new.image_url,
      available: new.available,
      created_at: now,
    }
  }

  fn apply_patch(&mut self, patch: ProductPatch) {
    if let Some(details) = patch.details {
      self.name = details.name;
      self.description = details.description;
      self.price_cents = details.price_cents;
      self.category = details.category;
      self.image_url = details.image_url;
      self.available = details.available;
    }
    if let Some(available) = patch.available {
      self.available = available;
    }
  }
}

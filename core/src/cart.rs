// carta/src/cart.rs
use serde::{Deserialize, Serialize};

use crate::model::{total_cents, LineItem, Product};
use crate::validation::{ValidationError, MAX_LINE_QUANTITY};

/// Lines picked on the public menu, in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
  lines: Vec<LineItem>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds `quantity` of `product`, merging with an existing line.
  pub fn add_product(&mut self, product: &Product, quantity: u32) -> Result<(), ValidationError> {
    if !product.available {
      return Err(ValidationError::ProductUnavailable { product_id: product.id });
    }
    let existing = self
      .lines
      .iter()
      .find(|line| line.product_id == product.id)
      .map_or(0, |line| line.quantity);
    let merged = existing.saturating_add(quantity);
    if quantity == 0 || merged > MAX_LINE_QUANTITY {
      return Err(ValidationError::InvalidQuantity { product_id: product.id });
    }
    match self.lines.iter_mut().find(|line| line.product_id == product.id) {
      Some(line) => line.quantity = merged,
      None => self
        .lines
        .push(LineItem::new(product.id, product.name.clone(), product.price_cents, quantity)),
    }
    Ok(())
  }

  /// Sets a line's quantity; 0 removes it. Returns false if the product is
  /// not in the cart.
  pub fn set_quantity(&mut self, product_id: u64, quantity: u32) -> bool {
    if quantity == 0 {
      return self.remove(product_id).is_some();
    }
    match self.lines.iter_mut().find(|line| line.product_id == product_id) {
      Some(line) => {
        line.quantity = quantity.min(MAX_LINE_QUANTITY);
        true
      }
      None => false,
    }
  }

  pub fn remove(&mut self, product_id: u64) -> Option<LineItem> {
    let index = self.lines.iter().position(|line| line.product_id == product_id)?;
    Some(self.lines.remove(index))
  }

  pub fn lines(&self) -> &[LineItem] {
    &self.lines
  }

  pub fn into_lines(self) -> Vec<LineItem> {
    self.lines
  }

  pub fn total_cents(&self) -> u64 {
    total_cents(&self.lines)
  }

  /// Number of units across all lines.
  pub fn item_count(&self) -> u32 {
    self
      .lines
      .iter()
      .map(|line| line.quantity)
      .fold(0, u32::saturating_add)
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }
}

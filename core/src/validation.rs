// carta/src/validation.rs

//! Validation gates.
//!
//! Pure predicates checked before a transition is allowed: advancing the
//! checkout wizard, saving a product, answering a review. They never touch a
//! store and can be called any number of times.

use thiserror::Error;

use crate::model::{Customer, DeliveryType, LineItem, MenuDraft, ProductDraft};
use crate::money::{parse_price_cents, MAX_PRICE_CENTS};

/// Most units of one product a single order line may hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Customer {field} is required")]
  MissingField { field: &'static str },

  #[error("A delivery address is required for home delivery")]
  MissingAddress,

  #[error("Product name is required")]
  MissingName,

  #[error("Invalid product price '{input}'")]
  InvalidPrice { input: String },

  #[error("Product category is required")]
  MissingCategory,

  #[error("Menu name is required")]
  MissingMenuName,

  #[error("Review response cannot be empty")]
  EmptyResponse,

  #[error("Rating {value} is outside 1..=5")]
  InvalidRating { value: u8 },

  #[error("The cart is empty")]
  EmptyCart,

  #[error("Line for product {product_id} has a quantity outside 1..=999")]
  InvalidQuantity { product_id: u64 },

  #[error("Product {product_id} is not available")]
  ProductUnavailable { product_id: u64 },
}

impl ValidationError {
  /// Message shown to the person filling in the form.
  pub fn user_message(&self) -> &'static str {
    match self {
      ValidationError::MissingField { .. } => "Por favor completa los datos del cliente",
      ValidationError::MissingAddress => "Por favor ingresa la dirección de entrega",
      ValidationError::MissingName => "El nombre del producto es requerido",
      ValidationError::InvalidPrice { input } if is_over_max_price(input) => "El precio no puede superar 1000000.00",
      ValidationError::InvalidPrice { .. } => "El precio debe ser mayor a 0",
      ValidationError::MissingCategory => "Selecciona una categoría",
      ValidationError::MissingMenuName => "El nombre del menú es requerido",
      ValidationError::EmptyResponse => "La respuesta no puede estar vacía",
      ValidationError::InvalidRating { .. } => "La calificación debe estar entre 1 y 5",
      ValidationError::EmptyCart => "Tu carrito está vacío",
      ValidationError::InvalidQuantity { .. } => "La cantidad debe estar entre 1 y 999",
      ValidationError::ProductUnavailable { .. } => "Este producto no está disponible",
    }
  }
}

fn is_over_max_price(input: &str) -> bool {
  parse_price_cents(input).map_or(false, |cents| cents > MAX_PRICE_CENTS)
}

fn is_blank(s: &str) -> bool {
  s.trim().is_empty()
}

/// Name and phone are required; email is optional.
pub fn validate_customer(customer: &Customer) -> Result<(), ValidationError> {
  if is_blank(&customer.name) {
    return Err(ValidationError::MissingField { field: "name" });
  }
  if is_blank(&customer.phone) {
    return Err(ValidationError::MissingField { field: "phone" });
  }
  Ok(())
}

/// The address only matters for home delivery.
pub fn validate_delivery(delivery_type: DeliveryType, address: &str) -> Result<(), ValidationError> {
  if delivery_type == DeliveryType::Delivery && is_blank(address) {
    return Err(ValidationError::MissingAddress);
  }
  Ok(())
}

/// Checked in form order: name, price, category. The price must lie in
/// `1..=MAX_PRICE_CENTS` once parsed.
pub fn validate_product(draft: &ProductDraft) -> Result<(), ValidationError> {
  if is_blank(&draft.name) {
    return Err(ValidationError::MissingName);
  }
  match parse_price_cents(&draft.price) {
    Some(cents) if (1..=MAX_PRICE_CENTS).contains(&cents) => {}
    _ => {
      return Err(ValidationError::InvalidPrice {
        input: draft.price.clone(),
      })
    }
  }
  if is_blank(&draft.category) {
    return Err(ValidationError::MissingCategory);
  }
  Ok(())
}

pub fn validate_menu(draft: &MenuDraft) -> Result<(), ValidationError> {
  if is_blank(&draft.name) {
    return Err(ValidationError::MissingMenuName);
  }
  Ok(())
}

pub fn validate_response(response: &str) -> Result<(), ValidationError> {
  if is_blank(response) {
    return Err(ValidationError::EmptyResponse);
  }
  Ok(())
}

pub fn validate_line_items(items: &[LineItem]) -> Result<(), ValidationError> {
  if items.is_empty() {
    return Err(ValidationError::EmptyCart);
  }
  if let Some(line) = items
    .iter()
    .find(|line| line.quantity == 0 || line.quantity > MAX_LINE_QUANTITY)
  {
    return Err(ValidationError::InvalidQuantity {
      product_id: line.product_id,
    });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft(name: &str, price: &str, category: &str) -> ProductDraft {
    ProductDraft {
      name: name.to_string(),
      price: price.to_string(),
      category: category.to_string(),
      ..Default::default()
    }
  }

  #[test]
  fn customer_requires_name_before_phone() {
    assert_eq!(
      validate_customer(&Customer::new("", "")),
      Err(ValidationError::MissingField { field: "name" })
    );
    assert_eq!(
      validate_customer(&Customer::new("Ana", "   ")),
      Err(ValidationError::MissingField { field: "phone" })
    );
    assert_eq!(validate_customer(&Customer::new("Ana", "555")), Ok(()));
  }

  #[test]
  fn address_only_required_for_delivery() {
    assert_eq!(
      validate_delivery(DeliveryType::Delivery, " "),
      Err(ValidationError::MissingAddress)
    );
    assert_eq!(validate_delivery(DeliveryType::Pickup, ""), Ok(()));
    assert_eq!(validate_delivery(DeliveryType::DineIn, ""), Ok(()));
    assert_eq!(validate_delivery(DeliveryType::Delivery, "Calle Reforma 567"), Ok(()));
  }

  #[test]
  fn product_gate_order() {
    assert_eq!(validate_product(&draft(" ", "abc", "")), Err(ValidationError::MissingName));
    assert_eq!(
      validate_product(&draft("Tamales", "abc", "")),
      Err(ValidationError::InvalidPrice {
        input: "abc".to_string()
      })
    );
    assert_eq!(
      validate_product(&draft("Tamales", "0", "Entradas")),
      Err(ValidationError::InvalidPrice { input: "0".to_string() })
    );
    assert_eq!(
      validate_product(&draft("Tamales", "-10", "Entradas")),
      Err(ValidationError::InvalidPrice {
        input: "-10".to_string()
      })
    );
    assert_eq!(
      validate_product(&draft("Tamales", "40", "")),
      Err(ValidationError::MissingCategory)
    );
    assert_eq!(validate_product(&draft("Tamales", "40.50", "Entradas")), Ok(()));
  }

  #[test]
  fn price_has_an_upper_bound() {
    assert_eq!(validate_product(&draft("Banquete", "1000000", "Entradas")), Ok(()));
    let err = validate_product(&draft("Banquete", "100000000000000000", "Entradas")).unwrap_err();
    assert_eq!(
      err,
      ValidationError::InvalidPrice {
        input: "100000000000000000".to_string()
      }
    );
    assert_eq!(err.user_message(), "El precio no puede superar 1000000.00");
    assert_eq!(
      ValidationError::InvalidPrice { input: "0".to_string() }.user_message(),
      "El precio debe ser mayor a 0"
    );
  }

  #[test]
  fn response_and_lines() {
    assert_eq!(validate_response("  "), Err(ValidationError::EmptyResponse));
    assert_eq!(validate_response("Gracias"), Ok(()));
    assert_eq!(validate_line_items(&[]), Err(ValidationError::EmptyCart));
    assert_eq!(
      validate_line_items(&[LineItem::new(4, "Enchiladas Verdes", 9500, 0)]),
      Err(ValidationError::InvalidQuantity { product_id: 4 })
    );
    assert_eq!(
      validate_line_items(&[LineItem::new(4, "Enchiladas Verdes", 9500, MAX_LINE_QUANTITY + 1)]),
      Err(ValidationError::InvalidQuantity { product_id: 4 })
    );
  }
}

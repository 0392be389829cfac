// carta/src/model/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store::Record;

/// Lifecycle status of an order. Wire names follow the dashboard's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
  #[serde(rename = "pendiente")]
  Pending,
  #[serde(rename = "confirmado")]
  Confirmed,
  #[serde(rename = "preparando")]
  Preparing,
  #[serde(rename = "listo")]
  Ready,
  #[serde(rename = "entregado")]
  Delivered,
  #[serde(rename = "cancelado")]
  Cancelled,
}

impl OrderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "pendiente",
      OrderStatus::Confirmed => "confirmado",
      OrderStatus::Preparing => "preparando",
      OrderStatus::Ready => "listo",
      OrderStatus::Delivered => "entregado",
      OrderStatus::Cancelled => "cancelado",
    }
  }

  /// Parses a wire name (`"listo"`); used for query-string filters.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "pendiente" => Some(OrderStatus::Pending),
      "confirmado" => Some(OrderStatus::Confirmed),
      "preparando" => Some(OrderStatus::Preparing),
      "listo" => Some(OrderStatus::Ready),
      "entregado" => Some(OrderStatus::Delivered),
      "cancelado" => Some(OrderStatus::Cancelled),
      _ => None,
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeliveryType {
  #[default]
  #[serde(rename = "delivery")]
  Delivery,
  #[serde(rename = "pickup")]
  Pickup,
  #[serde(rename = "dine-in")]
  DineIn,
}

impl DeliveryType {
  pub fn label(&self) -> &'static str {
    match self {
      DeliveryType::Delivery => "Entrega a domicilio",
      DeliveryType::Pickup => "Recoger en tienda",
      DeliveryType::DineIn => "Comer en el lugar",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
  #[default]
  #[serde(rename = "efectivo", alias = "cash")]
  Cash,
  #[serde(rename = "paypal")]
  PayPal,
  #[serde(rename = "stripe")]
  Stripe,
  #[serde(rename = "mercadopago")]
  MercadoPago,
  #[serde(rename = "oxxo")]
  Oxxo,
}

impl PaymentMethod {
  pub fn label(&self) -> &'static str {
    match self {
      PaymentMethod::Cash => "Efectivo",
      PaymentMethod::PayPal => "PayPal",
      PaymentMethod::Stripe => "Tarjeta de Crédito/Débito",
      PaymentMethod::MercadoPago => "MercadoPago",
      PaymentMethod::Oxxo => "OXXO Pay",
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
  pub name: String,
  pub phone: String,
  #[serde(default)]
  pub email: String,
}

impl Customer {
  pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
    Customer {
      name: name.into(),
      phone: phone.into(),
      email: String::new(),
    }
  }

  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = email.into();
    self
  }
}

/// One product line of an order or cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
  pub product_id: u64,
  pub name: String,
  pub unit_price_cents: u64,
  pub quantity: u32,
}

impl LineItem {
  pub fn new(product_id: u64, name: impl Into<String>, unit_price_cents: u64, quantity: u32) -> Self {
    LineItem {
      product_id,
      name: name.into(),
      unit_price_cents,
      quantity,
    }
  }

  /// Saturates at `u64::MAX` instead of overflowing.
  pub fn subtotal_cents(&self) -> u64 {
    self.unit_price_cents.saturating_mul(u64::from(self.quantity))
  }
}

/// Sum of the subtotals of `items`, saturating at `u64::MAX`.
pub fn total_cents(items: &[LineItem]) -> u64 {
  items
    .iter()
    .map(LineItem::subtotal_cents)
    .fold(0, u64::saturating_add)
}

/// The part of an order a customer fills in during checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDraft {
  pub delivery_type: DeliveryType,
  pub customer: Customer,
  pub address: String,
  pub payment_method: PaymentMethod,
  pub notes: String,
}

/// Everything the store needs to create an order. Id, status and timestamp
/// are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
  pub customer: Customer,
  pub items: Vec<LineItem>,
  pub delivery_type: DeliveryType,
  pub address: Option<String>,
  pub payment_method: PaymentMethod,
  pub notes: String,
}

impl NewOrder {
  /// Combines a checkout draft with the cart lines.
  ///
  /// The address is only kept for home delivery; pickup and dine-in orders
  /// never carry one even if the customer typed it before switching type.
  pub fn from_draft(draft: &OrderDraft, items: Vec<LineItem>) -> Self {
    let address = match draft.delivery_type {
      DeliveryType::Delivery if !draft.address.trim().is_empty() => Some(draft.address.trim().to_string()),
      _ => None,
    };
    NewOrder {
      customer: Customer {
        name: draft.customer.name.trim().to_string(),
        phone: draft.customer.phone.trim().to_string(),
        email: draft.customer.email.trim().to_string(),
      },
      items,
      delivery_type: draft.delivery_type,
      address,
      payment_method: draft.payment_method,
      notes: draft.notes.trim().to_string(),
    }
  }
}

/// Partial update accepted by `OrderStore::update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPatch {
  pub status: Option<OrderStatus>,
  pub notes: Option<String>,
}

impl OrderPatch {
  pub fn status(status: OrderStatus) -> Self {
    OrderPatch {
      status: Some(status),
      ..Default::default()
    }
  }
}

/// A placed order (pedido).
///
/// `items` and `total_cents` are private so the total can never drift from
/// the lines; deserialization goes through [`OrderRecord`] and recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OrderRecord")]
pub struct Order {
  pub id: u64,
  pub customer: Customer,
  items: Vec<LineItem>,
  total_cents: u64,
  pub delivery_type: DeliveryType,
  pub address: Option<String>,
  pub payment_method: PaymentMethod,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
  pub notes: String,
}

/// Wire shape of an [`Order`]; the stored total is ignored.
#[derive(Deserialize)]
struct OrderRecord {
  id: u64,
  customer: Customer,
  items: Vec<LineItem>,
  delivery_type: DeliveryType,
  #[serde(default)]
  address: Option<String>,
  payment_method: PaymentMethod,
  status: OrderStatus,
  created_at: DateTime<Utc>,
  #[serde(default)]
  notes: String,
}

impl From<OrderRecord> for Order {
  fn from(r: OrderRecord) -> Self {
    Order {
      id: r.id,
      customer: r.customer,
      total_cents: total_cents(&r.items),
      items: r.items,
      delivery_type: r.delivery_type,
      address: r.address,
      payment_method: r.payment_method,
      status: r.status,
      created_at: r.created_at,
      notes: r.notes,
    }
  }
}

impl Order {
  pub fn items(&self) -> &[LineItem] {
    &self.items
  }

  pub fn total_cents(&self) -> u64 {
    self.total_cents
  }

  pub fn with_items(mut self, items: Vec<LineItem>) -> Self {
    self.total_cents = total_cents(&items);
    self.items = items;
    self
  }

  pub fn with_status(mut self, status: OrderStatus) -> Self {
    self.status = status;
    self
  }
}

impl Record for Order {
  type New = NewOrder;
  type Patch = OrderPatch;
  const ENTITY: &'static str = "Pedido";

  fn id(&self) -> u64 {
    self.id
  }

  fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  fn from_new(id: u64, new: NewOrder, now: DateTime<Utc>) -> Self {
    Order {
      id,
      customer: new.customer,
      total_cents: total_cents(&new.items),
      items: new.items,
      delivery_type: new.delivery_type,
      address: new.address,
      payment_method: new.payment_method,
      status: OrderStatus::Pending,
      created_at: now,
      notes: new.notes,
    }
  }

  fn apply_patch(&mut self, patch: OrderPatch) {
    if let Some(status) = patch.status {
      self.status = status;
    }
    if let Some(notes) = patch.notes {
      self.notes = notes;
    }
  }
}

// carta/src/lib.rs

//! Carta: order lifecycle and checkout core for restaurant menu sites.
//!
//!  - Validation gates for checkout details, products and review responses.
//!  - An order status machine with per-order serialized transitions.
//!  - A three-step checkout wizard with a single-flight submit.
//!  - Async store contracts with an in-memory implementation.
//!  - Per-establishment services (catalog, order board, review desk) behind
//!    a subdomain-keyed registry.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod model;
pub mod money;
pub mod notify;
pub mod orders;
pub mod reviews;
pub mod shared;
pub mod status;
pub mod store;
pub mod tenant;
pub mod validation;

// --- Re-exports for the Public API ---

pub use crate::error::{CartaError, CartaResult};
pub use crate::validation::ValidationError;

pub use crate::model::{
  Customer, DeliveryType, LineItem, Menu, MenuDraft, NewOrder, NewProduct, NewReview, Order, OrderDraft, OrderPatch,
  OrderStatus, PaymentMethod, Product, ProductDraft, ProductPatch, Rating, Review, ReviewPatch,
};

pub use crate::cart::Cart;
pub use crate::catalog::{Catalog, MenuQuery, PublicMenu};
pub use crate::checkout::{CheckoutSession, CheckoutStep, CheckoutWizard, SubmitOutcome};
pub use crate::notify::{NoticeKind, Notifier, TracingNotifier};
pub use crate::orders::{CustomerSummary, OrderBoard, OrderFilter};
pub use crate::reviews::{ReviewDesk, ReviewFilter, ReviewStats};
pub use crate::shared::Shared;
pub use crate::status::{transition, OrderStatusMachine};
pub use crate::store::{MemoryStore, MenuStore, OrderStore, ProductStore, Record, ReviewStore, Store};
pub use crate::tenant::{Tenant, TenantRegistry, TenantStores};

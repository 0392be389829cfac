// carta/src/model/mod.rs

//! Records owned by the stores: orders, reviews, products and menus.

pub mod menu;
pub mod order;
pub mod product;
pub mod review;

pub use menu::{Menu, MenuDraft, MenuPatch, NewMenu};
pub use order::{
  total_cents, Customer, DeliveryType, LineItem, NewOrder, Order, OrderDraft, OrderPatch, OrderStatus, PaymentMethod,
};
pub use product::{NewProduct, Product, ProductDraft, ProductPatch};
pub use review::{NewReview, Rating, Review, ReviewPatch};

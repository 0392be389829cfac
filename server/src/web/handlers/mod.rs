// carta_server/src/web/handlers/mod.rs

pub mod checkout_handlers;
pub mod menu_handlers;
pub mod order_handlers;
pub mod product_handlers;
pub mod review_handlers;

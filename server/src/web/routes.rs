// carta_server/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{checkout_handlers, menu_handlers, order_handlers, product_handlers, review_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      // Public menu
      .route(
        "/menu/{subdomain}",
        web::get().to(menu_handlers::public_menu_handler),
      )
      // Public checkout
      .service(
        web::scope("/checkout/{subdomain}")
          .route("", web::post().to(checkout_handlers::start_checkout_handler))
          .route("/{session_id}", web::get().to(checkout_handlers::get_checkout_handler))
          .route("/{session_id}", web::delete().to(checkout_handlers::discard_checkout_handler))
          .route("/{session_id}/draft", web::put().to(checkout_handlers::update_draft_handler))
          .route("/{session_id}/advance", web::post().to(checkout_handlers::advance_handler))
          .route("/{session_id}/retreat", web::post().to(checkout_handlers::retreat_handler))
          .route("/{session_id}/submit", web::post().to(checkout_handlers::submit_handler)),
      )
      // Dashboard
      .service(
        web::scope("/admin/{subdomain}")
          .route("/orders", web::get().to(order_handlers::list_orders_handler))
          .route("/orders/{order_id}", web::get().to(order_handlers::get_order_handler))
          .route("/orders/{order_id}", web::delete().to(order_handlers::delete_order_handler))
          .route(
            "/orders/{order_id}/status",
            web::post().to(order_handlers::set_order_status_handler),
          )
          .route("/customers", web::get().to(order_handlers::list_customers_handler))
          .route("/reviews", web::get().to(review_handlers::list_reviews_handler))
          .route("/reviews/stats", web::get().to(review_handlers::review_stats_handler))
          .route(
            "/reviews/{review_id}/response",
            web::post().to(review_handlers::respond_review_handler),
          )
          .route("/products", web::get().to(product_handlers::list_products_handler))
          .route("/products", web::post().to(product_handlers::create_product_handler))
          .route("/products/{product_id}", web::put().to(product_handlers::update_product_handler))
          .route("/products/{product_id}", web::delete().to(product_handlers::delete_product_handler))
          .route(
            "/products/{product_id}/availability",
            web::post().to(product_handlers::toggle_availability_handler),
          )
          .route("/menus", web::get().to(product_handlers::list_menus_handler))
          .route("/menus", web::post().to(product_handlers::create_menu_handler))
          .route("/menus/{menu_id}", web::put().to(product_handlers::update_menu_handler)),
      ),
  );
}

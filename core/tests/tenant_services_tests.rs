// tests/tenant_services_tests.rs
mod common;
use common::*;
use carta::catalog::MenuQuery;
use carta::store::seed::{demo_reviews, DEMO_SUBDOMAIN};
use carta::{
  Cart, CartaError, MenuDraft, NoticeKind, OrderFilter, OrderStatus, ProductDraft, ReviewDesk, Store, Tenant, TenantRegistry,
  TenantStores, ValidationError,
};
use serial_test::serial;
use std::sync::Arc;

fn demo_tenant() -> (Tenant, Arc<RecordingNotifier>) {
  let notifier = Arc::new(RecordingNotifier::default());
  (Tenant::new(DEMO_SUBDOMAIN, TenantStores::demo(), notifier.clone()), notifier)
}

fn draft(name: &str, price: &str, category: &str) -> ProductDraft {
  ProductDraft {
    name: name.to_string(),
    price: price.to_string(),
    category: category.to_string(),
    ..Default::default()
  }
}

#[tokio::test]
#[serial]
async fn test_review_is_answered_once() {
  setup_tracing();
  let (tenant, notifier) = demo_tenant();
  let desk = tenant.review_desk();

  let err = desk.respond(2, "   ").await.unwrap_err();
  assert!(matches!(err, CartaError::Validation(ValidationError::EmptyResponse)));
  assert_eq!(
    notifier.last(),
    Some((NoticeKind::Error, "La respuesta no puede estar vacía".to_string()))
  );

  let answered = desk.respond(2, "Gracias Carlos, ya estamos trabajando en ello.").await.unwrap();
  assert!(answered.is_answered());
  assert_eq!(
    notifier.last(),
    Some((NoticeKind::Success, "Respuesta enviada exitosamente".to_string()))
  );

  let err = desk.respond(2, "Otra vez").await.unwrap_err();
  assert!(matches!(err, CartaError::AlreadyResponded { review_id: 2 }));
  assert_eq!(desk.stats().await.unwrap().unanswered, 3);
}

#[tokio::test]
#[serial]
async fn test_racing_responses_keep_the_first() {
  setup_tracing();
  let notifier = Arc::new(RecordingNotifier::default());
  let store = Arc::new(YieldingStore::new(demo_reviews()));
  let desk = ReviewDesk::new(store.clone(), notifier.clone());

  let (first, second) = tokio::join!(desk.respond(2, "primera"), desk.respond(2, "segunda"));

  assert_eq!(first.unwrap().response, "primera");
  assert!(matches!(second, Err(CartaError::AlreadyResponded { review_id: 2 })));
  assert_eq!(store.get_by_id(2).await.unwrap().response, "primera");
  assert_eq!(notifier.count(NoticeKind::Success), 1);
  assert_eq!(notifier.count(NoticeKind::Error), 1);
}

#[tokio::test]
#[serial]
async fn test_product_gates_and_availability() {
  setup_tracing();
  let (tenant, notifier) = demo_tenant();
  let catalog = tenant.catalog();

  let err = catalog.create(&draft("Tamales", "abc", "Entradas")).await.unwrap_err();
  assert!(matches!(
    err,
    CartaError::Validation(ValidationError::InvalidPrice { .. })
  ));
  assert_eq!(
    notifier.last(),
    Some((NoticeKind::Error, "El precio debe ser mayor a 0".to_string()))
  );

  let created = catalog.create(&draft("Tamales", "40.50", "Entradas")).await.unwrap();
  assert_eq!((created.id, created.price_cents), (7, 4050));

  let hidden = catalog.toggle_availability(created.id).await.unwrap();
  assert!(!hidden.available);
  assert_eq!(
    notifier.last(),
    Some((NoticeKind::Success, "Producto deshabilitado".to_string()))
  );

  let menu = catalog.public_menu(DEMO_SUBDOMAIN, &MenuQuery::default()).await.unwrap();
  assert!(menu.products.iter().all(|p| p.available));
  assert!(!menu.products.iter().any(|p| p.id == created.id));
  assert!(!menu.categories.contains(&"Postres".to_string()));

  let updated = catalog
    .update(created.id, &draft("Tamales Oaxaqueños", "45", "Platos Principales"))
    .await
    .unwrap();
  assert_eq!(updated.price_cents, 4500);
  assert!(updated.available);

  catalog.delete(created.id).await.unwrap();
  assert!(matches!(
    catalog.get(created.id).await,
    Err(CartaError::NotFound { .. })
  ));
}

#[tokio::test]
#[serial]
async fn test_cart_feeds_checkout() {
  setup_tracing();
  let (tenant, _notifier) = demo_tenant();
  let catalog = tenant.catalog();

  let mut cart = Cart::new();
  for id in [1, 3, 1] {
    cart.add_product(&catalog.get(id).await.unwrap(), 1).unwrap();
  }
  assert!(cart.add_product(&catalog.get(6).await.unwrap(), 1).is_err());

  let wizard = tenant.start_checkout(cart.into_lines()).unwrap();
  wizard.update_draft(pickup_draft("Ana", "555")).unwrap();
  wizard.advance().unwrap();
  wizard.advance().unwrap();
  let order = wizard.submit().await.unwrap();
  assert_eq!(order.id, 6);
  assert_eq!(order.total_cents(), 19500);

  let board = tenant.order_board();
  let pending = board
    .list(&OrderFilter {
      status: Some(OrderStatus::Pending),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(pending.iter().map(|o| o.id).collect::<Vec<_>>(), vec![6, 5]);
}

#[tokio::test]
#[serial]
async fn test_order_board_admin_operations() {
  setup_tracing();
  let (tenant, notifier) = demo_tenant();
  let board = tenant.order_board();

  let confirmed = board.set_status(5, OrderStatus::Confirmed).await.unwrap();
  assert_eq!(confirmed.status, OrderStatus::Confirmed);
  assert_eq!(notifier.count(NoticeKind::Success), 1);

  let removed = board.delete(4).await.unwrap();
  assert_eq!(removed.status, OrderStatus::Delivered);
  assert!(matches!(board.get(4).await, Err(CartaError::NotFound { id: 4, .. })));

  let customers = board.customers().await.unwrap();
  assert_eq!(customers.len(), 4);
  assert!(customers.iter().all(|c| c.order_count == 1));
}

#[tokio::test]
#[serial]
async fn test_registry_resolves_subdomains_verbatim() {
  setup_tracing();
  let registry = TenantRegistry::new();
  registry.register(Tenant::demo(DEMO_SUBDOMAIN));
  registry.register(Tenant::in_memory("cafe-azul"));

  let demo = registry.get(DEMO_SUBDOMAIN).unwrap();
  assert_eq!(demo.order_board().list(&OrderFilter::default()).await.unwrap().len(), 5);
  let empty = registry.get("cafe-azul").unwrap();
  assert!(empty.order_board().list(&OrderFilter::default()).await.unwrap().is_empty());

  match registry.get("mi-restaurante.example.com") {
    Err(CartaError::UnknownTenant { subdomain }) => assert_eq!(subdomain, "mi-restaurante.example.com"),
    other => panic!("Expected UnknownTenant, got {:?}", other.map(|t| t.subdomain().to_string())),
  }
}

#[tokio::test]
#[serial]
async fn test_menus_are_created_and_edited() {
  setup_tracing();
  let (tenant, notifier) = demo_tenant();
  let catalog = tenant.catalog();

  let err = catalog
    .create_menu(DEMO_SUBDOMAIN, &MenuDraft::default())
    .await
    .unwrap_err();
  assert!(matches!(err, CartaError::Validation(ValidationError::MissingMenuName)));
  assert_eq!(
    notifier.last(),
    Some((NoticeKind::Error, "El nombre del menú es requerido".to_string()))
  );

  let draft = MenuDraft {
    name: "Menú de Temporada".to_string(),
    categories: vec!["Postres".to_string(), " Postres ".to_string()],
    ..Default::default()
  };
  let created = catalog.create_menu(DEMO_SUBDOMAIN, &draft).await.unwrap();
  assert_eq!(created.id, 3);
  assert_eq!(created.establishment, DEMO_SUBDOMAIN);
  assert_eq!(created.categories, vec!["Postres"]);
  assert_eq!(
    notifier.last(),
    Some((NoticeKind::Success, "Menú creado exitosamente".to_string()))
  );

  let edit = MenuDraft {
    active: false,
    ..draft
  };
  let updated = catalog.update_menu(3, &edit).await.unwrap();
  assert!(!updated.active);
  assert_eq!(updated.created_at, created.created_at);
  assert_eq!(
    notifier.last(),
    Some((NoticeKind::Success, "Menú actualizado exitosamente".to_string()))
  );

  let err = catalog.update_menu(42, &edit).await.unwrap_err();
  assert!(matches!(err, CartaError::NotFound { id: 42, .. }));
  assert_eq!(
    notifier.last(),
    Some((NoticeKind::Error, "Error al guardar el menú".to_string()))
  );
  assert_eq!(catalog.menus().await.unwrap().len(), 3);
}

// carta/src/store/seed.rs

//! Demo data for a freshly provisioned establishment ("mi-restaurante").

use chrono::{DateTime, TimeZone, Utc};

use super::Record;
use crate::model::{
  Customer, DeliveryType, LineItem, Menu, NewOrder, NewReview, Order, OrderStatus, PaymentMethod, Product, Rating,
  Review,
};

pub const DEMO_SUBDOMAIN: &str = "mi-restaurante";

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single().unwrap_or_default()
}

fn product(
  id: u64,
  name: &str,
  description: &str,
  price_cents: u64,
  category: &str,
  available: bool,
  created_at: DateTime<Utc>,
) -> Product {
  Product {
    id,
    name: name.to_string(),
    description: description.to_string(),
    price_cents,
    category: category.to_string(),
    image_url: String::new(),
    available,
    created_at,
  }
}

pub fn demo_products() -> Vec<Product> {
  vec![
    product(
      1,
      "Tacos de Pastor",
      "Deliciosos tacos de pastor con piña, cebolla y cilantro. Acompañados de salsa verde y roja.",
      8500,
      "Platos Principales",
      true,
      at(2024, 1, 10, 0, 0),
    ),
    product(
      2,
      "Quesadillas de Queso",
      "Quesadillas tradicionales con queso Oaxaca derretido, servidas con guacamole y crema.",
      6500,
      "Entradas",
      true,
      at(2024, 1, 12, 0, 0),
    ),
    product(
      3,
      "Agua de Horchata",
      "Refrescante agua de horchata tradicional, endulzada naturalmente con canela y vainilla.",
      2500,
      "Bebidas",
      true,
      at(2024, 1, 15, 0, 0),
    ),
    product(
      4,
      "Enchiladas Verdes",
      "Enchiladas bañadas en salsa verde con pollo deshebrado, queso fresco y crema. Acompañadas de frijoles.",
      9500,
      "Platos Principales",
      true,
      at(2024, 1, 18, 0, 0),
    ),
    product(
      5,
      "Guacamole con Totopos",
      "Guacamole fresco preparado al momento con aguacate, jitomate, cebolla y cilantro. Servido con totopos.",
      5500,
      "Entradas",
      true,
      at(2024, 1, 20, 0, 0),
    ),
    product(
      6,
      "Flan Napolitano",
      "Postre tradicional mexicano con textura cremosa y caramelo líquido, decorado con cereza.",
      4500,
      "Postres",
      false,
      at(2024, 1, 22, 0, 0),
    ),
  ]
}

#[allow(clippy::too_many_arguments)]
fn order(
  id: u64,
  customer: Customer,
  items: Vec<LineItem>,
  delivery_type: DeliveryType,
  address: Option<&str>,
  payment_method: PaymentMethod,
  status: OrderStatus,
  created_at: DateTime<Utc>,
  notes: &str,
) -> Order {
  let new = NewOrder {
    customer,
    items,
    delivery_type,
    address: address.map(str::to_string),
    payment_method,
    notes: notes.to_string(),
  };
  Order::from_new(id, new, created_at).with_status(status)
}

pub fn demo_orders() -> Vec<Order> {
  vec![
    order(
      1,
      Customer::new("Ana García Martínez", "+52 55 1234 5678").with_email("ana.garcia@email.com"),
      vec![
        LineItem::new(1, "Tacos de Pastor", 8500, 2),
        LineItem::new(3, "Agua de Horchata", 2500, 1),
      ],
      DeliveryType::Delivery,
      Some("Av. Insurgentes Sur 1234, Col. Del Valle, CDMX"),
      PaymentMethod::Cash,
      OrderStatus::Preparing,
      at(2024, 1, 25, 14, 30),
      "Sin cebolla en los tacos, por favor",
    ),
    order(
      2,
      Customer::new("Carlos Mendoza López", "+52 55 9876 5432").with_email("carlos.mendoza@email.com"),
      vec![
        LineItem::new(4, "Enchiladas Verdes", 9500, 1),
        LineItem::new(5, "Guacamole con Totopos", 5500, 1),
      ],
      DeliveryType::Pickup,
      None,
      PaymentMethod::PayPal,
      OrderStatus::Ready,
      at(2024, 1, 25, 13, 45),
      "",
    ),
    order(
      3,
      Customer::new("María Elena López", "+52 55 5555 1111").with_email("maria.lopez@email.com"),
      vec![
        LineItem::new(1, "Tacos de Pastor", 8500, 3),
        LineItem::new(2, "Quesadillas de Queso", 6500, 2),
      ],
      DeliveryType::DineIn,
      None,
      PaymentMethod::Stripe,
      OrderStatus::Confirmed,
      at(2024, 1, 25, 12, 15),
      "Mesa para 4 personas",
    ),
    order(
      4,
      Customer::new("Roberto Silva Hernández", "+52 55 7777 8888").with_email("roberto.silva@email.com"),
      vec![
        LineItem::new(2, "Quesadillas de Queso", 6500, 1),
        LineItem::new(3, "Agua de Horchata", 2500, 2),
      ],
      DeliveryType::Delivery,
      Some("Calle Reforma 567, Col. Centro, CDMX"),
      PaymentMethod::MercadoPago,
      OrderStatus::Delivered,
      at(2024, 1, 25, 11, 30),
      "Dejar en recepción del edificio",
    ),
    order(
      5,
      Customer::new("Elena Ruiz Morales", "+52 55 3333 4444").with_email("elena.ruiz@email.com"),
      vec![
        LineItem::new(4, "Enchiladas Verdes", 9500, 2),
        LineItem::new(5, "Guacamole con Totopos", 5500, 1),
        LineItem::new(6, "Flan Napolitano", 4500, 2),
      ],
      DeliveryType::Pickup,
      None,
      PaymentMethod::Oxxo,
      OrderStatus::Pending,
      at(2024, 1, 25, 10, 45),
      "Llamar 10 minutos antes",
    ),
  ]
}

fn review(id: u64, customer: &str, stars: u8, comment: &str, created_at: DateTime<Utc>, response: &str) -> Review {
  let mut review = Review::from_new(
    id,
    NewReview {
      customer: customer.to_string(),
      rating: Rating::saturating(stars),
      comment: comment.to_string(),
    },
    created_at,
  );
  review.response = response.to_string();
  review
}

pub fn demo_reviews() -> Vec<Review> {
  vec![
    review(
      1,
      "Ana García",
      5,
      "Excelente servicio y comida deliciosa. Los tacos de pastor están increíbles, definitivamente regresaré pronto.",
      at(2024, 1, 24, 19, 30),
      "Muchas gracias Ana por tu comentario. Nos alegra saber que disfrutaste tu experiencia con nosotros.",
    ),
    review(
      2,
      "Carlos Mendoza",
      4,
      "Muy buena comida y precios justos. El ambiente es agradable, solo sugiero mejorar un poco los tiempos de entrega.",
      at(2024, 1, 23, 20, 15),
      "",
    ),
    review(
      3,
      "María López",
      5,
      "Las enchiladas verdes están espectaculares. El sabor casero y la atención al cliente son excelentes.",
      at(2024, 1, 22, 18, 45),
      "Gracias María, nos esforzamos por mantener ese sabor casero que tanto nos caracteriza.",
    ),
    review(
      4,
      "Roberto Silva",
      3,
      "La comida está bien, pero creo que podrían mejorar la presentación de los platos. El sabor es bueno.",
      at(2024, 1, 21, 21, 0),
      "",
    ),
    review(
      5,
      "Elena Ruiz",
      5,
      "Pedí para llevar y todo llegó perfecto. El guacamole fresco y los totopos crujientes. ¡Recomendado al 100%!",
      at(2024, 1, 20, 17, 30),
      "Elena, nos da mucho gusto saber que todo llegó en perfecto estado. Gracias por tu recomendación.",
    ),
    review(
      6,
      "José Martínez",
      4,
      "Buena relación calidad-precio. Las porciones son generosas y el sabor auténtico mexicano.",
      at(2024, 1, 19, 16, 15),
      "",
    ),
    review(
      7,
      "Laura González",
      2,
      "La comida tardó mucho en llegar y cuando llegó estaba fría. Espero puedan mejorar el servicio.",
      at(2024, 1, 18, 19, 45),
      "",
    ),
    review(
      8,
      "Diego Ramírez",
      5,
      "Simplemente perfecto. Desde el pedido hasta la entrega todo fue excelente. El flan napolitano es mi favorito.",
      at(2024, 1, 17, 20, 30),
      "Diego, muchísimas gracias por tus palabras. El flan es una de nuestras especialidades favoritas también.",
    ),
  ]
}

pub fn demo_menus() -> Vec<Menu> {
  vec![
    Menu {
      id: 1,
      name: "Menú Principal".to_string(),
      description: "Nuestro menú completo con todos los platillos disponibles".to_string(),
      active: true,
      categories: vec![
        "Entradas".to_string(),
        "Platos Principales".to_string(),
        "Postres".to_string(),
        "Bebidas".to_string(),
      ],
      created_at: at(2024, 1, 15, 0, 0),
      establishment: DEMO_SUBDOMAIN.to_string(),
    },
    Menu {
      id: 2,
      name: "Menú Ejecutivo".to_string(),
      description: "Menú especial para comidas de trabajo".to_string(),
      active: false,
      categories: vec!["Comidas Ejecutivas".to_string(), "Bebidas".to_string()],
      created_at: at(2024, 2, 1, 0, 0),
      establishment: DEMO_SUBDOMAIN.to_string(),
    },
  ]
}

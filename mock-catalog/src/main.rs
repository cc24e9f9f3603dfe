use actix_web::{delete, get, post, web, App, HttpResponse, HttpServer};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

const SIZES: [&str; 3] = ["small", "medium", "large"];
const MAX_NAME_LEN: usize = 100;
const MAX_PRICE: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct MenuItem {
    id: u64,
    name: String,
    size: String,
    price: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct NewMenuItem {
    name: String,
    size: String,
    price: f64,
}

#[derive(Debug, Default)]
struct MenuInner {
    items: Vec<MenuItem>,
    next_id: u64,
}

#[derive(Debug, Default)]
struct Menu {
    inner: RwLock<MenuInner>,
}

impl Menu {
    fn seeded() -> Self {
        let seed = [
            ("Espresso", "small", 3.0),
            ("Americano", "large", 3.5),
            ("Latte", "medium", 4.0),
            ("Cappuccino", "medium", 4.5),
            ("Mocha", "large", 5.0),
        ];
        let items: Vec<MenuItem> = seed
            .iter()
            .enumerate()
            .map(|(i, (name, size, price))| MenuItem {
                id: i as u64 + 1,
                name: name.to_string(),
                size: size.to_string(),
                price: *price,
            })
            .collect();
        let next_id = items.len() as u64 + 1;
        Self {
            inner: RwLock::new(MenuInner { items, next_id }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MenuQuery {
    size: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
}

fn detail(status: actix_web::http::StatusCode, msg: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "detail": msg.into() }))
}

fn validate(item: NewMenuItem) -> Result<NewMenuItem, String> {
    let name = item.name.trim().to_string();
    if name.is_empty() {
        return Err("name must not be empty".into());
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(format!("name must be at most {MAX_NAME_LEN} characters"));
    }
    if !SIZES.contains(&item.size.as_str()) {
        return Err("size must be one of: small, medium, large".into());
    }
    if !(item.price > 0.0 && item.price <= MAX_PRICE) {
        return Err(format!("price must be greater than 0 and at most {MAX_PRICE}"));
    }
    Ok(NewMenuItem {
        name,
        size: item.size,
        price: (item.price * 100.0).round() / 100.0,
    })
}

#[get("/health")]
async fn health(menu: web::Data<Menu>) -> HttpResponse {
    let count = menu.inner.read().await.items.len();
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "mock-catalog",
        "beverages_count": count,
    }))
}

#[get("/menu")]
async fn list_menu(menu: web::Data<Menu>, q: web::Query<MenuQuery>) -> HttpResponse {
    let r = menu.inner.read().await;
    let items: Vec<&MenuItem> = r
        .items
        .iter()
        .filter(|b| q.size.as_deref().map_or(true, |s| b.size == s))
        .filter(|b| q.min_price.map_or(true, |min| b.price >= min))
        .filter(|b| q.max_price.map_or(true, |max| b.price <= max))
        .collect();
    tracing::info!("GET /menu -> {} beverages", items.len());
    HttpResponse::Ok().json(items)
}

#[get("/menu/{name}")]
async fn get_beverage(menu: web::Data<Menu>, path: web::Path<String>) -> HttpResponse {
    let wanted = path.trim().to_lowercase();
    let r = menu.inner.read().await;
    match r.items.iter().find(|b| b.name.to_lowercase() == wanted) {
        Some(b) => HttpResponse::Ok().json(b),
        None => detail(
            actix_web::http::StatusCode::NOT_FOUND,
            format!("beverage '{}' not found", path.as_str()),
        ),
    }
}

#[post("/menu")]
async fn add_beverage(menu: web::Data<Menu>, body: web::Json<NewMenuItem>) -> HttpResponse {
    let item = match validate(body.into_inner()) {
        Ok(item) => item,
        Err(msg) => return detail(actix_web::http::StatusCode::UNPROCESSABLE_ENTITY, msg),
    };
    let mut w = menu.inner.write().await;
    let lower = item.name.to_lowercase();
    if w.items.iter().any(|b| b.name.to_lowercase() == lower) {
        return detail(
            actix_web::http::StatusCode::BAD_REQUEST,
            format!("a beverage named '{}' already exists", item.name),
        );
    }
    let created = MenuItem {
        id: w.next_id,
        name: item.name,
        size: item.size,
        price: item.price,
    };
    w.next_id += 1;
    w.items.push(created.clone());
    tracing::info!(id = created.id, name = %created.name, "beverage added");
    HttpResponse::Created().json(created)
}

#[delete("/menu/{id}")]
async fn delete_beverage(menu: web::Data<Menu>, path: web::Path<u64>) -> HttpResponse {
    let id = path.into_inner();
    let mut w = menu.inner.write().await;
    match w.items.iter().position(|b| b.id == id) {
        Some(i) => {
            w.items.remove(i);
            HttpResponse::NoContent().finish()
        }
        None => detail(
            actix_web::http::StatusCode::NOT_FOUND,
            format!("beverage with id {id} not found"),
        ),
    }
}

fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(list_menu)
        .service(get_beverage)
        .service(add_beverage)
        .service(delete_beverage);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".into());
    let menu = web::Data::new(Menu::seeded());

    tracing::info!("mock-catalog listening on {}", bind);

    HttpServer::new(move || App::new().app_data(menu.clone()).configure(config))
        .bind(bind)?
        .run()
        .await
}

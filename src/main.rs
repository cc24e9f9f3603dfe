use actix_web::{middleware::Logger, App, HttpServer};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

use coffee_orders::{
    catalog_service::HttpBeverageCatalog, config::AppConfig, order_service::OrderService,
    repositories::in_memory::InMemoryOrderRepository, routes, state::AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let catalog = HttpBeverageCatalog::new(config.catalog_url.clone(), config.catalog_timeout)
        .map_err(std::io::Error::other)?;
    let orders = OrderService::new(InMemoryOrderRepository::default(), catalog);
    let state = AppState::new(orders);

    tracing::info!(
        addr = %config.server_addr,
        catalog = %config.catalog_url,
        "orders-api starting"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::config)
    })
    .bind(&config.server_addr)?
    .run()
    .await
}

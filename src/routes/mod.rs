use crate::handlers;
use actix_web::web::{self, ServiceConfig};

pub fn config(cfg: &mut ServiceConfig) {
    cfg.service(web::scope("/health").route("", web::get().to(handlers::health::health)))
        .service(
            web::scope("/orders")
                .route("", web::post().to(handlers::orders::create_order))
                .route("", web::get().to(handlers::orders::list_orders))
                .route("", web::delete().to(handlers::orders::clear_orders))
                .route("/health", web::get().to(handlers::health::health))
                .route("/statistics", web::get().to(handlers::orders::statistics))
                .route(
                    "/status/{status}",
                    web::get().to(handlers::orders::orders_by_status),
                )
                .route(
                    "/customer/{name}",
                    web::get().to(handlers::orders::orders_by_customer),
                )
                .route("/{id}", web::get().to(handlers::orders::get_order)),
        );
}

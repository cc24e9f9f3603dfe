pub mod catalog_service;
pub mod config;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod order_service;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

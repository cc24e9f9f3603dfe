use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::entities::beverage::Beverage;
use crate::errors::CatalogError;

/// Read-only view of the beverage menu kept by the external catalog.
#[async_trait]
pub trait BeverageCatalog: Send + Sync {
    /// `Ok(false)` only when the catalog answered that the beverage is unknown.
    async fn exists(&self, name: &str) -> Result<bool, CatalogError>;
    /// `Ok(None)` when the beverage is unknown; errors are transport or decoding failures.
    async fn lookup(&self, name: &str) -> Result<Option<Beverage>, CatalogError>;
}

#[derive(Clone)]
pub struct HttpBeverageCatalog {
    client: Client,
    base_url: Url,
}

impl HttpBeverageCatalog {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Unexpected(format!("http client: {e}")))?;
        Ok(Self { client, base_url })
    }

    fn menu_url(&self, name: &str) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::Unexpected(format!("not a base url: {}", self.base_url)))?
            .pop_if_empty()
            .push("menu")
            .push(name);
        Ok(url)
    }

    async fn fetch(&self, name: &str) -> Result<Response, CatalogError> {
        let url = self.menu_url(name)?;
        debug!(%url, "catalog: GET");
        self.client.get(url).send().await.map_err(|e| {
            warn!(beverage = %name, err = %e, "catalog: request failed");
            CatalogError::Unavailable(e.to_string())
        })
    }
}

fn unexpected_status(status: StatusCode) -> CatalogError {
    if status.is_server_error() {
        CatalogError::Unavailable(format!("catalog answered {status}"))
    } else {
        CatalogError::Unexpected(format!("catalog answered {status}"))
    }
}

#[async_trait]
impl BeverageCatalog for HttpBeverageCatalog {
    async fn exists(&self, name: &str) -> Result<bool, CatalogError> {
        let resp = self.fetch(name).await?;
        match resp.status() {
            s if s.is_success() => {
                info!(beverage = %name, "catalog: beverage found");
                Ok(true)
            }
            StatusCode::NOT_FOUND => {
                warn!(beverage = %name, "catalog: beverage not found");
                Ok(false)
            }
            s => Err(unexpected_status(s)),
        }
    }

    async fn lookup(&self, name: &str) -> Result<Option<Beverage>, CatalogError> {
        let resp = self.fetch(name).await?;
        match resp.status() {
            s if s.is_success() => resp
                .json::<Beverage>()
                .await
                .map(Some)
                .map_err(|e| CatalogError::Unexpected(format!("bad beverage body: {e}"))),
            StatusCode::NOT_FOUND => Ok(None),
            s => Err(unexpected_status(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpResponse, HttpServer};
    use rust_decimal_macros::dec;
    use serde_json::json;

    async fn menu_item(path: web::Path<String>) -> HttpResponse {
        match path.as_str() {
            "Latte" => HttpResponse::Ok().json(json!({
                "id": 1, "name": "Latte", "size": "medium", "price": 4.0
            })),
            "Flat White" => HttpResponse::Ok().json(json!({
                "id": 2, "name": "Flat White", "size": "small", "price": 3.75
            })),
            "Broken" => HttpResponse::InternalServerError().finish(),
            "Teapot" => HttpResponse::build(actix_web::http::StatusCode::IM_A_TEAPOT).finish(),
            "Garbled" => HttpResponse::Ok().body("definitely not json"),
            "Slow" => {
                actix_web::rt::time::sleep(Duration::from_secs(2)).await;
                HttpResponse::Ok().finish()
            }
            _ => HttpResponse::NotFound().json(json!({ "detail": "not found" })),
        }
    }

    fn spawn_catalog() -> Url {
        let server = HttpServer::new(|| App::new().route("/menu/{name}", web::get().to(menu_item)))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    fn client(base: Url) -> HttpBeverageCatalog {
        HttpBeverageCatalog::new(base, Duration::from_millis(500)).unwrap()
    }

    #[test]
    fn menu_url_encodes_name_as_one_segment() {
        let c = client(Url::parse("http://catalog.local/api/").unwrap());
        let url = c.menu_url("Flat White/Extra").unwrap();
        assert_eq!(
            url.as_str(),
            "http://catalog.local/api/menu/Flat%20White%2FExtra"
        );
    }

    #[actix_web::test]
    async fn exists_distinguishes_found_and_not_found() {
        let c = client(spawn_catalog());
        assert!(c.exists("Latte").await.unwrap());
        assert!(!c.exists("Mud").await.unwrap());
    }

    #[actix_web::test]
    async fn lookup_decodes_price() {
        let c = client(spawn_catalog());
        let latte = c.lookup("Latte").await.unwrap().unwrap();
        assert_eq!(latte.name, "Latte");
        assert_eq!(latte.price, dec!(4.0));

        let flat = c.lookup("Flat White").await.unwrap().unwrap();
        assert_eq!(flat.price, dec!(3.75));
        assert_eq!(flat.size, "small");

        assert!(c.lookup("Mud").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn server_errors_mean_unavailable() {
        let c = client(spawn_catalog());
        assert!(matches!(
            c.exists("Broken").await,
            Err(CatalogError::Unavailable(_))
        ));
        assert!(matches!(
            c.exists("Teapot").await,
            Err(CatalogError::Unexpected(_))
        ));
        assert!(matches!(
            c.lookup("Garbled").await,
            Err(CatalogError::Unexpected(_))
        ));
    }

    #[actix_web::test]
    async fn unreachable_or_slow_catalog_is_unavailable() {
        let refused = client(Url::parse("http://127.0.0.1:1/").unwrap());
        assert!(matches!(
            refused.exists("Latte").await,
            Err(CatalogError::Unavailable(_))
        ));

        let slow = client(spawn_catalog());
        assert!(matches!(
            slow.exists("Slow").await,
            Err(CatalogError::Unavailable(_))
        ));
    }
}

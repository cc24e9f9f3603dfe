use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::Display;
use serde::Serialize;

use crate::entities::order::OrderStatus;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display("order {} not found", _0)]
    OrderNotFound(u64),
    #[display("{}", _0)]
    Validation(String),
    #[display("{}", _0)]
    BeverageNotFound(String),
    #[display("beverage catalog is unavailable, try again later")]
    ServiceUnavailable,
    #[display("internal server error")]
    Internal,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::OrderNotFound(_) => "ORDER_NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BeverageNotFound(_) => "BEVERAGE_NOT_FOUND",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

#[derive(Serialize)]
struct ErrBody {
    error: &'static str,
    message: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::OrderNotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BeverageNotFound(_) => StatusCode::BAD_REQUEST,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrBody {
            error: self.code(),
            message: self.to_string(),
        })
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(v) => Self::Validation(v.to_string()),
            e @ OrderError::BeverageNotFound(_) => Self::BeverageNotFound(e.to_string()),
            OrderError::CatalogUnavailable(reason) => {
                tracing::error!(%reason, "beverage catalog unavailable");
                Self::ServiceUnavailable
            }
            OrderError::Internal(reason) => {
                tracing::error!(%reason, "internal error");
                Self::Internal
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("beverage name must not be empty")]
    EmptyBeverageName,
    #[error("invalid size '{0}', use one of: small, medium, large")]
    InvalidSize(String),
    #[error("customer name must not be blank when provided")]
    BlankCustomerName,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("beverage catalog unavailable: {0}")]
    Unavailable(String),
    #[error("unexpected beverage catalog response: {0}")]
    Unexpected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status transition {from} -> {to}")]
pub struct InvalidTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("beverage '{0}' is not available on the menu")]
    BeverageNotFound(String),
    #[error("{0}")]
    CatalogUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CatalogError> for OrderError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Unavailable(reason) => Self::CatalogUnavailable(reason),
            CatalogError::Unexpected(reason) => Self::Internal(reason),
        }
    }
}

impl From<InvalidTransition> for OrderError {
    fn from(err: InvalidTransition) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepoErr {
    #[error("not found")]
    NotFound,
}

impl From<RepoErr> for OrderError {
    fn from(err: RepoErr) -> Self {
        Self::Internal(format!("order store: {err}"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

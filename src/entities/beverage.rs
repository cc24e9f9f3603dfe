use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A menu entry as returned by the beverage catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Beverage {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    pub size: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{InvalidTransition, ValidationError};
use crate::utils::now_ms;

/// Reason recorded on orders whose beverage the catalog does not know.
pub const REJECTION_REASON: &str = "beverage not available on the menu";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderSize {
    Small,
    Medium,
    Large,
}

impl OrderSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for OrderSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive: only the lower-case names are accepted.
impl FromStr for OrderSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(ValidationError::InvalidSize(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [Self::Pending, Self::Confirmed, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Case-insensitive lookup by name; `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub beverage_name: String,
    pub size: OrderSize,
    pub status: OrderStatus,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub customer_name: Option<String>,
    pub created_at: i64,
    pub rejection_reason: Option<String>,
}

/// Raw create input, checked by the order service before anything else runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[serde(default)]
    pub beverage_name: String,
    #[serde(default)]
    pub size: String,
    pub customer_name: Option<String>,
}

/// Identifier of an order that has not been stored yet.
pub const UNASSIGNED_ID: u64 = 0;

impl Order {
    /// A pending order; the store assigns `id` when it is appended.
    pub fn new(beverage_name: String, size: OrderSize, customer_name: Option<String>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            beverage_name,
            size,
            status: OrderStatus::Pending,
            price: None,
            customer_name,
            created_at: now_ms(),
            rejection_reason: None,
        }
    }

    pub fn confirm(&mut self, price: Option<Decimal>) -> Result<(), InvalidTransition> {
        self.transition(OrderStatus::Confirmed)?;
        self.price = price;
        Ok(())
    }

    pub fn reject(&mut self, reason: impl Into<String>) -> Result<(), InvalidTransition> {
        self.transition(OrderStatus::Rejected)?;
        self.rejection_reason = Some(reason.into());
        Ok(())
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == OrderStatus::Confirmed
    }

    pub fn is_rejected(&self) -> bool {
        self.status == OrderStatus::Rejected
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    fn transition(&mut self, to: OrderStatus) -> Result<(), InvalidTransition> {
        if self.status != OrderStatus::Pending {
            return Err(InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::customer::Customer;
use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Placed,
    Cancelled,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "PLACED" => Ok(OrderStatus::Placed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            "COMPLETED" => Ok(OrderStatus::Completed),
            other => Err(DomainError::Internal(format!(
                "unknown order status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub total_amount: Option<BigDecimal>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// A line captured during order placement. `unit_price` is the product price
/// at order time; it is never re-read from the live product afterwards.
#[derive(Debug, Clone)]
pub struct OrderItemInput {
    pub prod_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub prod_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

/// What the caller asks for: a product and how many of it.
#[derive(Debug, Clone)]
pub struct OrderItemRequest {
    pub prod_id: Uuid,
    pub quantity: i32,
}

/// An order joined with its customer and item lines. The customer row may
/// have been removed out-of-band, so it stays optional.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub order: Order,
    pub customer: Option<Customer>,
    pub items: Vec<OrderItem>,
}

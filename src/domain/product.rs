use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Product {
    pub prod_id: Uuid,
    pub name: String,
    pub sku: String,
    pub price: BigDecimal,
    /// Absent stock is distinct from zero; arithmetic treats it as 0.
    pub stock: Option<i32>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn available_stock(&self) -> i32 {
        self.stock.unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub price: BigDecimal,
    pub stock: i32,
    pub category: Option<String>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<BigDecimal>,
    pub stock: Option<i32>,
    pub category: Option<String>,
}

impl ProductUpdate {
    pub fn stock(stock: i32) -> Self {
        ProductUpdate {
            stock: Some(stock),
            ..Default::default()
        }
    }
}

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, Product, ProductUpdate};

/// Cap on the catalog scan behind low-stock filtering.
const SCAN_LIMIT: i64 = 1000;

pub struct ProductService<P> {
    products: P,
}

impl<P: ProductRepository> ProductService<P> {
    pub fn new(products: P) -> Self {
        Self { products }
    }

    pub fn add_product(&self, new: NewProduct) -> Result<Product, DomainError> {
        if new.price <= BigDecimal::from(0) {
            return Err(DomainError::Validation(
                "price must be greater than 0".to_string(),
            ));
        }
        if self.products.find_by_sku(&new.sku)?.is_some() {
            return Err(DomainError::Conflict(format!(
                "sku already exists: {}",
                new.sku
            )));
        }
        self.products.create(new)
    }

    /// Add `delta` units to the product's stock, treating absent stock as 0.
    pub fn restock(&self, prod_id: Uuid, delta: i32) -> Result<Product, DomainError> {
        if delta <= 0 {
            return Err(DomainError::Validation(
                "restock delta must be positive".to_string(),
            ));
        }
        let product = self
            .products
            .find_by_id(prod_id)?
            .ok_or_else(|| DomainError::not_found("product", prod_id))?;
        let stock = product.available_stock().checked_add(delta).ok_or_else(|| {
            DomainError::Validation("restock would overflow the stock counter".to_string())
        })?;
        self.products
            .update(prod_id, ProductUpdate::stock(stock))?
            .ok_or_else(|| DomainError::not_found("product", prod_id))
    }

    pub fn low_stock(&self, threshold: i32) -> Result<Vec<Product>, DomainError> {
        let all = self.products.list(SCAN_LIMIT, None)?;
        Ok(all
            .into_iter()
            .filter(|p| p.available_stock() <= threshold)
            .collect())
    }

    pub fn list_products(
        &self,
        limit: i64,
        category: Option<&str>,
    ) -> Result<Vec<Product>, DomainError> {
        self.products.list(limit, category)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use uuid::Uuid;

    use super::ProductService;
    use crate::application::test_support::InMemoryProducts;
    use crate::domain::errors::DomainError;
    use crate::domain::product::{NewProduct, Product};

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn widget(sku: &str, price: &str, stock: i32) -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            sku: sku.to_string(),
            price: dec(price),
            stock,
            category: None,
        }
    }

    fn service() -> (ProductService<InMemoryProducts>, InMemoryProducts) {
        let products = InMemoryProducts::default();
        (ProductService::new(products.clone()), products)
    }

    #[test]
    fn zero_price_is_rejected_one_cent_is_not() {
        let (svc, _) = service();

        let err = svc
            .add_product(widget("W1", "0", 5))
            .expect_err("zero price should fail");
        assert!(matches!(err, DomainError::Validation(_)));

        let product = svc
            .add_product(widget("W1", "0.01", 5))
            .expect("one cent should succeed");
        assert_eq!(product.price, dec("0.01"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let (svc, _) = service();
        assert!(matches!(
            svc.add_product(widget("W1", "-1", 5)),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn duplicate_sku_is_a_conflict() {
        let (svc, _) = service();
        svc.add_product(widget("W1", "10", 5))
            .expect("first add failed");

        let err = svc
            .add_product(widget("W1", "12", 1))
            .expect_err("duplicate sku should fail");
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn restock_adds_to_current_stock() {
        let (svc, products) = service();
        let product = svc.add_product(widget("W1", "10", 5)).expect("add failed");

        let updated = svc.restock(product.prod_id, 7).expect("restock failed");
        assert_eq!(updated.stock, Some(12));
        assert_eq!(products.stock_of(product.prod_id), Some(12));
    }

    #[test]
    fn restock_treats_absent_stock_as_zero() {
        let (svc, products) = service();
        let prod_id = Uuid::new_v4();
        products.push(Product {
            prod_id,
            name: "Phantom".to_string(),
            sku: "P0".to_string(),
            price: dec("1"),
            stock: None,
            category: None,
            created_at: Utc::now(),
        });

        let updated = svc.restock(prod_id, 4).expect("restock failed");
        assert_eq!(updated.stock, Some(4));
    }

    #[test]
    fn restock_rejects_non_positive_delta_and_unknown_product() {
        let (svc, _) = service();
        let product = svc.add_product(widget("W1", "10", 5)).expect("add failed");

        assert!(matches!(
            svc.restock(product.prod_id, 0),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.restock(Uuid::new_v4(), 3),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn restock_overflow_is_a_validation_error() {
        let (svc, products) = service();
        let product = svc
            .add_product(widget("W1", "10", i32::MAX - 1))
            .expect("add failed");

        let err = svc
            .restock(product.prod_id, 2)
            .expect_err("overflowing restock should fail");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(products.stock_of(product.prod_id), Some(i32::MAX - 1));
    }

    #[test]
    fn low_stock_boundary_is_inclusive() {
        let (svc, _) = service();
        svc.add_product(widget("AT", "10", 5)).expect("add failed");
        svc.add_product(widget("BELOW", "10", 2))
            .expect("add failed");
        svc.add_product(widget("ABOVE", "10", 6))
            .expect("add failed");

        let low = svc.low_stock(5).expect("low_stock failed");
        let skus: Vec<&str> = low.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["AT", "BELOW"]);
    }
}

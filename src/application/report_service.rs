use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};

/// Cap on the order scan behind every aggregation.
const SCAN_LIMIT: i64 = 1000;

#[derive(Debug, Clone)]
pub struct ProductSales {
    pub prod_id: Uuid,
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone)]
pub struct CustomerOrderCount {
    pub customer_id: Uuid,
    pub total_orders: i64,
}

pub struct ReportService<C, P, O> {
    customers: C,
    products: P,
    orders: O,
}

impl<C, P, O> ReportService<C, P, O>
where
    C: CustomerRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    pub fn new(customers: C, products: P, orders: O) -> Self {
        Self {
            customers,
            products,
            orders,
        }
    }

    /// Sum item quantities per product across all orders and return the top
    /// `n`, best seller first. Tie order between equal sellers is unspecified.
    pub fn top_selling_products(&self, n: usize) -> Result<Vec<ProductSales>, DomainError> {
        let mut quantities: HashMap<Uuid, i64> = HashMap::new();
        for order in self.orders.list_all(SCAN_LIMIT)? {
            for item in self.orders.items(order.id)? {
                *quantities.entry(item.prod_id).or_insert(0) += i64::from(item.quantity);
            }
        }

        let mut ranked: Vec<(Uuid, i64)> = quantities.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let mut top = Vec::new();
        for (prod_id, quantity) in ranked.into_iter().take(n) {
            match self.products.find_by_id(prod_id)? {
                Some(product) => top.push(ProductSales {
                    prod_id,
                    name: product.name,
                    quantity,
                }),
                None => log::warn!("product {} missing while ranking sales", prod_id),
            }
        }
        Ok(top)
    }

    /// Revenue over orders created in the last 30 days, boundary inclusive.
    pub fn total_revenue_last_month(&self) -> Result<BigDecimal, DomainError> {
        let cutoff = Utc::now() - Duration::days(30);
        let mut revenue = BigDecimal::from(0);
        for order in self.orders.list_all(SCAN_LIMIT)? {
            if order.created_at >= cutoff {
                if let Some(amount) = order.total_amount {
                    revenue += amount;
                }
            }
        }
        Ok(revenue)
    }

    pub fn orders_by_customer(&self) -> Result<Vec<CustomerOrderCount>, DomainError> {
        let mut counts: HashMap<Uuid, i64> = HashMap::new();
        for order in self.orders.list_all(SCAN_LIMIT)? {
            *counts.entry(order.customer_id).or_insert(0) += 1;
        }

        let mut out: Vec<CustomerOrderCount> = counts
            .into_iter()
            .map(|(customer_id, total_orders)| CustomerOrderCount {
                customer_id,
                total_orders,
            })
            .collect();
        out.sort_by(|a, b| b.total_orders.cmp(&a.total_orders));
        Ok(out)
    }

    /// Customers with strictly more than `min_orders` orders.
    pub fn frequent_customers(&self, min_orders: i64) -> Result<Vec<Customer>, DomainError> {
        let mut frequent = Vec::new();
        for count in self.orders_by_customer()? {
            if count.total_orders > min_orders {
                if let Some(customer) = self.customers.find_by_id(count.customer_id)? {
                    frequent.push(customer);
                }
            }
        }
        Ok(frequent)
    }
}

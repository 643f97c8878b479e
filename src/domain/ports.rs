use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::customer::{Customer, CustomerUpdate, NewCustomer};
use super::errors::DomainError;
use super::order::{Order, OrderItem, OrderItemInput, OrderStatus};
use super::payment::{NewPayment, Payment, PaymentUpdate};
use super::product::{NewProduct, Product, ProductUpdate};

/// Point reads return `Ok(None)` when no row matches; absence is a normal
/// outcome, not an error.
pub trait CustomerRepository: Send + Sync + 'static {
    fn create(&self, new: NewCustomer) -> Result<Customer, DomainError>;
    fn find_by_id(&self, customer_id: Uuid) -> Result<Option<Customer>, DomainError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;
    fn update(
        &self,
        customer_id: Uuid,
        changes: CustomerUpdate,
    ) -> Result<Option<Customer>, DomainError>;
    /// Returns the deleted row, or `None` when nothing matched.
    fn delete(&self, customer_id: Uuid) -> Result<Option<Customer>, DomainError>;
    fn list(&self, limit: i64) -> Result<Vec<Customer>, DomainError>;
    /// Equality filters, AND-combined; both optional.
    fn search(
        &self,
        email: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<Customer>, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn create(&self, new: NewProduct) -> Result<Product, DomainError>;
    fn find_by_id(&self, prod_id: Uuid) -> Result<Option<Product>, DomainError>;
    fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, DomainError>;
    fn update(&self, prod_id: Uuid, changes: ProductUpdate)
        -> Result<Option<Product>, DomainError>;
    /// No workflow deletes products; this exists for operational cleanup only.
    fn delete(&self, prod_id: Uuid) -> Result<Option<Product>, DomainError>;
    fn list(&self, limit: i64, category: Option<&str>) -> Result<Vec<Product>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Inserts the order and its item rows together and returns the order.
    fn create(
        &self,
        customer_id: Uuid,
        total_amount: BigDecimal,
        items: Vec<OrderItemInput>,
    ) -> Result<Order, DomainError>;
    fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, DomainError>;
    fn items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, DomainError>;
    fn by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError>;
    /// Unconditional status write; callers own any transition rules.
    fn update_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, DomainError>;
    fn list_all(&self, limit: i64) -> Result<Vec<Order>, DomainError>;
}

pub trait PaymentRepository: Send + Sync + 'static {
    fn create(&self, new: NewPayment) -> Result<Payment, DomainError>;
    /// Returns the earliest payment row for the order when several exist.
    fn find_by_order(&self, order_id: Uuid) -> Result<Option<Payment>, DomainError>;
    fn update(
        &self,
        payment_id: Uuid,
        changes: PaymentUpdate,
    ) -> Result<Option<Payment>, DomainError>;
}

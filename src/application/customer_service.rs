use uuid::Uuid;

use crate::domain::customer::{Customer, CustomerUpdate, NewCustomer};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CustomerRepository, OrderRepository};

pub struct CustomerService<C, O> {
    customers: C,
    orders: O,
}

impl<C, O> CustomerService<C, O>
where
    C: CustomerRepository,
    O: OrderRepository,
{
    pub fn new(customers: C, orders: O) -> Self {
        Self { customers, orders }
    }

    pub fn add_customer(&self, new: NewCustomer) -> Result<Customer, DomainError> {
        if self.customers.find_by_email(&new.email)?.is_some() {
            return Err(DomainError::Conflict(format!(
                "email already exists: {}",
                new.email
            )));
        }
        self.customers.create(new)
    }

    /// Partial update restricted to phone and city.
    pub fn update_customer(
        &self,
        customer_id: Uuid,
        changes: CustomerUpdate,
    ) -> Result<Customer, DomainError> {
        if self.customers.find_by_id(customer_id)?.is_none() {
            return Err(DomainError::not_found("customer", customer_id));
        }
        if changes.is_empty() {
            return Err(DomainError::Validation(
                "no updatable fields supplied".to_string(),
            ));
        }
        self.customers
            .update(customer_id, changes)?
            .ok_or_else(|| DomainError::not_found("customer", customer_id))
    }

    /// Delete a customer that owns no orders; returns the deleted snapshot.
    pub fn delete_customer(&self, customer_id: Uuid) -> Result<Customer, DomainError> {
        if !self.orders.by_customer(customer_id)?.is_empty() {
            return Err(DomainError::Conflict(
                "cannot delete: customer has orders".to_string(),
            ));
        }
        self.customers
            .delete(customer_id)?
            .ok_or_else(|| DomainError::not_found("customer", customer_id))
    }

    pub fn list_customers(&self, limit: i64) -> Result<Vec<Customer>, DomainError> {
        self.customers.list(limit)
    }

    pub fn search_customers(
        &self,
        email: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<Customer>, DomainError> {
        self.customers.search(email, city)
    }
}

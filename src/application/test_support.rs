//! In-memory fakes for the repository ports. Cloning a fake shares its
//! state, so tests can hold one handle and hand another to a service.

use std::sync::{Arc, Mutex};

use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::customer::{Customer, CustomerUpdate, NewCustomer};
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderItem, OrderItemInput, OrderStatus};
use crate::domain::payment::{NewPayment, Payment, PaymentUpdate};
use crate::domain::ports::{
    CustomerRepository, OrderRepository, PaymentRepository, ProductRepository,
};
use crate::domain::product::{NewProduct, Product, ProductUpdate};

#[derive(Clone, Default)]
pub(crate) struct InMemoryCustomers {
    rows: Arc<Mutex<Vec<Customer>>>,
}

impl CustomerRepository for InMemoryCustomers {
    fn create(&self, new: NewCustomer) -> Result<Customer, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|c| c.email == new.email) {
            return Err(DomainError::Conflict(format!(
                "duplicate email: {}",
                new.email
            )));
        }
        let customer = Customer {
            customer_id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            city: new.city,
            created_at: Utc::now(),
        };
        rows.push(customer.clone());
        Ok(customer)
    }

    fn find_by_id(&self, customer_id: Uuid) -> Result<Option<Customer>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|c| c.customer_id == customer_id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|c| c.email == email).cloned())
    }

    fn update(
        &self,
        customer_id: Uuid,
        changes: CustomerUpdate,
    ) -> Result<Option<Customer>, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(customer) = rows.iter_mut().find(|c| c.customer_id == customer_id) else {
            return Ok(None);
        };
        if let Some(phone) = changes.phone {
            customer.phone = phone;
        }
        if let Some(city) = changes.city {
            customer.city = Some(city);
        }
        Ok(Some(customer.clone()))
    }

    fn delete(&self, customer_id: Uuid) -> Result<Option<Customer>, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let pos = rows.iter().position(|c| c.customer_id == customer_id);
        Ok(pos.map(|i| rows.remove(i)))
    }

    fn list(&self, limit: i64) -> Result<Vec<Customer>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().take(limit as usize).cloned().collect())
    }

    fn search(
        &self,
        email: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<Customer>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|c| email.map_or(true, |e| c.email == e))
            .filter(|c| city.map_or(true, |t| c.city.as_deref() == Some(t)))
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryProducts {
    rows: Arc<Mutex<Vec<Product>>>,
}

impl InMemoryProducts {
    /// Insert a row as-is, bypassing create; used to seed absent stock.
    pub(crate) fn push(&self, product: Product) {
        self.rows.lock().unwrap().push(product);
    }

    pub(crate) fn stock_of(&self, prod_id: Uuid) -> Option<i32> {
        let rows = self.rows.lock().unwrap();
        rows.iter()
            .find(|p| p.prod_id == prod_id)
            .and_then(|p| p.stock)
    }
}

impl ProductRepository for InMemoryProducts {
    fn create(&self, new: NewProduct) -> Result<Product, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|p| p.sku == new.sku) {
            return Err(DomainError::Conflict(format!("duplicate sku: {}", new.sku)));
        }
        let product = Product {
            prod_id: Uuid::new_v4(),
            name: new.name,
            sku: new.sku,
            price: new.price,
            stock: Some(new.stock),
            category: new.category,
            created_at: Utc::now(),
        };
        rows.push(product.clone());
        Ok(product)
    }

    fn find_by_id(&self, prod_id: Uuid) -> Result<Option<Product>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.prod_id == prod_id).cloned())
    }

    fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.sku == sku).cloned())
    }

    fn update(
        &self,
        prod_id: Uuid,
        changes: ProductUpdate,
    ) -> Result<Option<Product>, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(product) = rows.iter_mut().find(|p| p.prod_id == prod_id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            product.name = name;
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(stock) = changes.stock {
            product.stock = Some(stock);
        }
        if let Some(category) = changes.category {
            product.category = Some(category);
        }
        Ok(Some(product.clone()))
    }

    fn delete(&self, prod_id: Uuid) -> Result<Option<Product>, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let pos = rows.iter().position(|p| p.prod_id == prod_id);
        Ok(pos.map(|i| rows.remove(i)))
    }

    fn list(&self, limit: i64, category: Option<&str>) -> Result<Vec<Product>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|p| category.map_or(true, |c| p.category.as_deref() == Some(c)))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryOrders {
    orders: Arc<Mutex<Vec<Order>>>,
    items: Arc<Mutex<Vec<OrderItem>>>,
}

impl InMemoryOrders {
    /// Shift an order's creation time into the past; used by revenue tests.
    pub(crate) fn backdate(&self, order_id: Uuid, days: i64) {
        let mut orders = self.orders.lock().unwrap();
        if let Some(order) = orders.iter_mut().find(|o| o.id == order_id) {
            order.created_at = order.created_at - Duration::days(days);
        }
    }
}

impl OrderRepository for InMemoryOrders {
    fn create(
        &self,
        customer_id: Uuid,
        total_amount: BigDecimal,
        items: Vec<OrderItemInput>,
    ) -> Result<Order, DomainError> {
        let order = Order {
            id: Uuid::new_v4(),
            customer_id,
            total_amount: Some(total_amount),
            status: OrderStatus::Placed,
            created_at: Utc::now(),
        };
        self.orders.lock().unwrap().push(order.clone());
        let mut rows = self.items.lock().unwrap();
        for item in items {
            rows.push(OrderItem {
                id: Uuid::new_v4(),
                order_id: order.id,
                prod_id: item.prod_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
            });
        }
        Ok(order)
    }

    fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, DomainError> {
        let orders = self.orders.lock().unwrap();
        Ok(orders.iter().find(|o| o.id == order_id).cloned())
    }

    fn items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, DomainError> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }

    fn by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.lock().unwrap();
        Ok(orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect())
    }

    fn update_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, DomainError> {
        let mut orders = self.orders.lock().unwrap();
        let Some(order) = orders.iter_mut().find(|o| o.id == order_id) else {
            return Ok(None);
        };
        order.status = status;
        Ok(Some(order.clone()))
    }

    fn list_all(&self, limit: i64) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.lock().unwrap();
        Ok(orders.iter().take(limit as usize).cloned().collect())
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryPayments {
    rows: Arc<Mutex<Vec<Payment>>>,
}

impl InMemoryPayments {
    pub(crate) fn count_for_order(&self, order_id: Uuid) -> usize {
        let rows = self.rows.lock().unwrap();
        rows.iter().filter(|p| p.order_id == order_id).count()
    }
}

impl PaymentRepository for InMemoryPayments {
    fn create(&self, new: NewPayment) -> Result<Payment, DomainError> {
        let payment = Payment {
            payment_id: Uuid::new_v4(),
            order_id: new.order_id,
            amount: new.amount,
            status: new.status,
            method: None,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(payment.clone());
        Ok(payment)
    }

    fn find_by_order(&self, order_id: Uuid) -> Result<Option<Payment>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.order_id == order_id).cloned())
    }

    fn update(
        &self,
        payment_id: Uuid,
        changes: PaymentUpdate,
    ) -> Result<Option<Payment>, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(payment) = rows.iter_mut().find(|p| p.payment_id == payment_id) else {
            return Ok(None);
        };
        if let Some(status) = changes.status {
            payment.status = status;
        }
        if let Some(method) = changes.method {
            payment.method = Some(method);
        }
        Ok(Some(payment.clone()))
    }
}

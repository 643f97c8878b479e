use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderDetails, OrderItemInput, OrderItemRequest, OrderStatus};
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::domain::product::ProductUpdate;

pub struct OrderService<C, P, O> {
    customers: C,
    products: P,
    orders: O,
}

impl<C, P, O> OrderService<C, P, O>
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

    /// Place an order: validate the customer, then walk the requested lines
    /// in order, deducting stock line by line and snapshotting each product's
    /// current price into the item record. Stock deducted for earlier lines
    /// stays deducted if a later line fails.
    pub fn create_order(
        &self,
        customer_id: Uuid,
        items: &[OrderItemRequest],
    ) -> Result<Order, DomainError> {
        if self.customers.find_by_id(customer_id)?.is_none() {
            return Err(DomainError::not_found("customer", customer_id));
        }

        let mut total = BigDecimal::from(0);
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            if item.quantity <= 0 {
                return Err(DomainError::Validation(format!(
                    "quantity must be positive for product {}",
                    item.prod_id
                )));
            }
            let product = self
                .products
                .find_by_id(item.prod_id)?
                .ok_or_else(|| DomainError::not_found("product", item.prod_id))?;
            let available = product.available_stock();
            if available < item.quantity {
                return Err(DomainError::InsufficientStock {
                    product: product.name,
                    available,
                });
            }
            self.products.update(
                product.prod_id,
                ProductUpdate::stock(available - item.quantity),
            )?;
            total += &product.price * BigDecimal::from(item.quantity);
            lines.push(OrderItemInput {
                prod_id: product.prod_id,
                quantity: item.quantity,
                unit_price: product.price,
            });
        }

        self.orders.create(customer_id, total, lines)
    }

    pub fn order_details(&self, order_id: Uuid) -> Result<OrderDetails, DomainError> {
        let order = self
            .orders
            .find_by_id(order_id)?
            .ok_or_else(|| DomainError::not_found("order", order_id))?;
        let customer = self.customers.find_by_id(order.customer_id)?;
        let items = self.orders.items(order_id)?;
        Ok(OrderDetails {
            order,
            customer,
            items,
        })
    }

    /// Cancel a PLACED order and give each line's quantity back to the
    /// product it came from, in item-list order.
    pub fn cancel_order(&self, order_id: Uuid) -> Result<Order, DomainError> {
        let order = self
            .orders
            .find_by_id(order_id)?
            .ok_or_else(|| DomainError::not_found("order", order_id))?;
        if order.status != OrderStatus::Placed {
            return Err(DomainError::InvalidState(
                "only PLACED orders can be cancelled".to_string(),
            ));
        }

        for item in self.orders.items(order_id)? {
            match self.products.find_by_id(item.prod_id)? {
                Some(product) => {
                    // Saturates near i32::MAX instead of failing the restore.
                    self.products.update(
                        product.prod_id,
                        ProductUpdate::stock(
                            product.available_stock().saturating_add(item.quantity),
                        ),
                    )?;
                }
                None => log::warn!(
                    "product {} missing while restoring stock for order {}",
                    item.prod_id,
                    order_id
                ),
            }
        }

        self.orders
            .update_status(order_id, OrderStatus::Cancelled)?
            .ok_or_else(|| DomainError::not_found("order", order_id))
    }

    pub fn complete_order(&self, order_id: Uuid) -> Result<Order, DomainError> {
        let order = self
            .orders
            .find_by_id(order_id)?
            .ok_or_else(|| DomainError::not_found("order", order_id))?;
        if order.status != OrderStatus::Placed {
            return Err(DomainError::InvalidState(
                "only PLACED orders can be completed".to_string(),
            ));
        }
        self.orders
            .update_status(order_id, OrderStatus::Completed)?
            .ok_or_else(|| DomainError::not_found("order", order_id))
    }

    pub fn orders_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError> {
        self.orders.by_customer(customer_id)
    }
}

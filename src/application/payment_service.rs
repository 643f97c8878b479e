use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::OrderStatus;
use crate::domain::payment::{NewPayment, Payment, PaymentStatus, PaymentUpdate};
use crate::domain::ports::{OrderRepository, PaymentRepository};

pub struct PaymentService<O, P> {
    orders: O,
    payments: P,
}

impl<O, P> PaymentService<O, P>
where
    O: OrderRepository,
    P: PaymentRepository,
{
    pub fn new(orders: O, payments: P) -> Self {
        Self { orders, payments }
    }

    /// Open a PENDING payment for the order's total. Nothing stops a second
    /// payment from being opened for the same order.
    pub fn create_payment(&self, order_id: Uuid) -> Result<Payment, DomainError> {
        let order = self
            .orders
            .find_by_id(order_id)?
            .ok_or_else(|| DomainError::not_found("order", order_id))?;
        let amount = order.total_amount.unwrap_or_else(|| BigDecimal::from(0));
        self.payments.create(NewPayment {
            order_id,
            amount,
            status: PaymentStatus::Pending,
        })
    }

    /// Mark the order's payment PAID with the given method, then mark the
    /// order COMPLETED. The two writes are independent round trips.
    pub fn process_payment(&self, order_id: Uuid, method: &str) -> Result<Payment, DomainError> {
        let payment = self
            .payments
            .find_by_order(order_id)?
            .ok_or_else(|| DomainError::NotFound(format!("payment for order {}", order_id)))?;
        if payment.status != PaymentStatus::Pending {
            return Err(DomainError::InvalidState(format!(
                "payment already {}",
                payment.status.as_str()
            )));
        }

        let updated = self
            .payments
            .update(
                payment.payment_id,
                PaymentUpdate {
                    status: Some(PaymentStatus::Paid),
                    method: Some(method.to_string()),
                },
            )?
            .ok_or_else(|| DomainError::not_found("payment", payment.payment_id))?;

        self.orders.update_status(order_id, OrderStatus::Completed)?;

        Ok(updated)
    }

    /// Unconditionally flip the order's payment to REFUNDED; there is no
    /// guard on the current status.
    pub fn refund_payment(&self, order_id: Uuid) -> Result<Payment, DomainError> {
        let payment = self
            .payments
            .find_by_order(order_id)?
            .ok_or_else(|| DomainError::NotFound(format!("payment for order {}", order_id)))?;
        self.payments
            .update(
                payment.payment_id,
                PaymentUpdate {
                    status: Some(PaymentStatus::Refunded),
                    method: None,
                },
            )?
            .ok_or_else(|| DomainError::not_found("payment", payment.payment_id))
    }
}

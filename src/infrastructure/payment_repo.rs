use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::payment::{NewPayment, Payment, PaymentUpdate};
use crate::domain::ports::PaymentRepository;
use crate::schema::payments;

use super::models::{NewPaymentRow, PaymentChanges, PaymentRow};

pub struct DieselPaymentRepository {
    pool: DbPool,
}

impl DieselPaymentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PaymentRepository for DieselPaymentRepository {
    fn create(&self, new: NewPayment) -> Result<Payment, DomainError> {
        let mut conn = self.pool.get()?;

        let row: PaymentRow = diesel::insert_into(payments::table)
            .values(&NewPaymentRow {
                payment_id: Uuid::new_v4(),
                order_id: new.order_id,
                amount: new.amount,
                status: new.status.as_str().to_string(),
            })
            .returning(PaymentRow::as_returning())
            .get_result(&mut conn)?;

        Payment::try_from(row)
    }

    fn find_by_order(&self, order_id: Uuid) -> Result<Option<Payment>, DomainError> {
        let mut conn = self.pool.get()?;

        // Several rows can exist for one order; take the earliest.
        let row = payments::table
            .filter(payments::order_id.eq(order_id))
            .select(PaymentRow::as_select())
            .order(payments::created_at.asc())
            .first(&mut conn)
            .optional()?;

        row.map(Payment::try_from).transpose()
    }

    fn update(
        &self,
        payment_id: Uuid,
        changes: PaymentUpdate,
    ) -> Result<Option<Payment>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(payments::table.filter(payments::payment_id.eq(payment_id)))
            .set(&PaymentChanges {
                status: changes.status.map(|s| s.as_str().to_string()),
                method: changes.method,
            })
            .returning(PaymentRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        row.map(Payment::try_from).transpose()
    }
}

use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderItem, OrderItemInput, OrderStatus};
use crate::domain::ports::OrderRepository;
use crate::schema::{order_items, orders};

use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(
        &self,
        customer_id: Uuid,
        total_amount: BigDecimal,
        items: Vec<OrderItemInput>,
    ) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        // The order and its item rows commit together; stock writes happen
        // elsewhere and are not covered by this transaction.
        conn.transaction::<_, DomainError, _>(|conn| {
            let order_id = Uuid::new_v4();
            let row: OrderRow = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: order_id,
                    customer_id,
                    total_amount: Some(total_amount),
                    status: OrderStatus::Placed.as_str().to_string(),
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            let item_rows: Vec<NewOrderItemRow> = items
                .into_iter()
                .map(|item| NewOrderItemRow {
                    id: Uuid::new_v4(),
                    order_id,
                    prod_id: item.prod_id,
                    quantity: item.quantity,
                    price: item.unit_price,
                })
                .collect();
            diesel::insert_into(order_items::table)
                .values(&item_rows)
                .execute(conn)?;

            Order::try_from(row)
        })
    }

    fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = orders::table
            .filter(orders::id.eq(order_id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(Order::try_from).transpose()
    }

    fn items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = order_items::table
            .filter(order_items::order_id.eq(order_id))
            .select(OrderItemRow::as_select())
            .order(order_items::created_at.asc())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(OrderItem::from).collect())
    }

    fn by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .filter(orders::customer_id.eq(customer_id))
            .select(OrderRow::as_select())
            .order(orders::created_at.asc())
            .load(&mut conn)?;

        rows.into_iter().map(Order::try_from).collect()
    }

    fn update_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(orders::table.filter(orders::id.eq(order_id)))
            .set((
                orders::status.eq(status.as_str()),
                orders::updated_at.eq(Utc::now()),
            ))
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        row.map(Order::try_from).transpose()
    }

    fn list_all(&self, limit: i64) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .select(OrderRow::as_select())
            .order(orders::created_at.desc())
            .limit(limit)
            .load(&mut conn)?;

        rows.into_iter().map(Order::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    use super::DieselOrderRepository;
    use crate::domain::customer::NewCustomer;
    use crate::domain::order::{OrderItemInput, OrderStatus};
    use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
    use crate::domain::product::NewProduct;
    use crate::infrastructure::testing::setup_db;
    use crate::infrastructure::{DieselCustomerRepository, DieselProductRepository};

    async fn seed(pool: &crate::db::DbPool) -> (Uuid, Uuid) {
        let customer = DieselCustomerRepository::new(pool.clone())
            .create(NewCustomer {
                name: "Ada".to_string(),
                email: format!("{}@example.com", Uuid::new_v4()),
                phone: "555-0100".to_string(),
                city: None,
            })
            .expect("customer create failed");
        let product = DieselProductRepository::new(pool.clone())
            .create(NewProduct {
                name: "Widget".to_string(),
                sku: Uuid::new_v4().to_string(),
                price: BigDecimal::from_str("10").expect("valid decimal"),
                stock: 5,
                category: None,
            })
            .expect("product create failed");
        (customer.customer_id, product.prod_id)
    }

    fn line(prod_id: Uuid, quantity: i32, price: &str) -> OrderItemInput {
        OrderItemInput {
            prod_id,
            quantity,
            unit_price: BigDecimal::from_str(price).expect("valid decimal"),
        }
    }

    #[tokio::test]
    async fn create_persists_order_and_items_together() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool.clone());
        let (customer_id, prod_id) = seed(&pool).await;

        let order = repo
            .create(
                customer_id,
                BigDecimal::from_str("30").expect("valid decimal"),
                vec![line(prod_id, 3, "10")],
            )
            .expect("create failed");

        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(
            order.total_amount,
            Some(BigDecimal::from_str("30").expect("valid decimal"))
        );

        let items = repo.items(order.id).expect("items failed");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
        assert_eq!(
            items[0].unit_price,
            BigDecimal::from_str("10").expect("valid decimal")
        );
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown_id() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool);

        let result = repo
            .find_by_id(Uuid::new_v4())
            .expect("find should not error");

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn update_status_rewrites_the_row() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool.clone());
        let (customer_id, prod_id) = seed(&pool).await;

        let order = repo
            .create(
                customer_id,
                BigDecimal::from_str("10").expect("valid decimal"),
                vec![line(prod_id, 1, "10")],
            )
            .expect("create failed");

        let updated = repo
            .update_status(order.id, OrderStatus::Cancelled)
            .expect("update failed")
            .expect("order should exist");
        assert_eq!(updated.status, OrderStatus::Cancelled);

        assert!(repo
            .update_status(Uuid::new_v4(), OrderStatus::Cancelled)
            .expect("update should not error")
            .is_none());
    }

    #[tokio::test]
    async fn by_customer_lists_only_that_customers_orders() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool.clone());
        let (customer_a, prod_id) = seed(&pool).await;
        let (customer_b, _) = seed(&pool).await;

        repo.create(
            customer_a,
            BigDecimal::from_str("10").expect("valid decimal"),
            vec![line(prod_id, 1, "10")],
        )
        .expect("create failed");

        assert_eq!(repo.by_customer(customer_a).expect("list failed").len(), 1);
        assert!(repo.by_customer(customer_b).expect("list failed").is_empty());
    }
}

use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::customer::{Customer, CustomerUpdate, NewCustomer};
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerRepository;
use crate::schema::customers;

use super::models::{CustomerChanges, CustomerRow, NewCustomerRow};

pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for DieselCustomerRepository {
    fn create(&self, new: NewCustomer) -> Result<Customer, DomainError> {
        let mut conn = self.pool.get()?;

        let row: CustomerRow = diesel::insert_into(customers::table)
            .values(&NewCustomerRow {
                customer_id: Uuid::new_v4(),
                name: new.name,
                email: new.email,
                phone: new.phone,
                city: new.city,
            })
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn find_by_id(&self, customer_id: Uuid) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = customers::table
            .filter(customers::customer_id.eq(customer_id))
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Customer::from))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = customers::table
            .filter(customers::email.eq(email))
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Customer::from))
    }

    fn update(
        &self,
        customer_id: Uuid,
        changes: CustomerUpdate,
    ) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(customers::table.filter(customers::customer_id.eq(customer_id)))
            .set(&CustomerChanges {
                phone: changes.phone,
                city: changes.city,
            })
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        Ok(row.map(Customer::from))
    }

    fn delete(&self, customer_id: Uuid) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::delete(customers::table.filter(customers::customer_id.eq(customer_id)))
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        Ok(row.map(Customer::from))
    }

    fn list(&self, limit: i64) -> Result<Vec<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = customers::table
            .select(CustomerRow::as_select())
            .order(customers::created_at.asc())
            .limit(limit)
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    fn search(
        &self,
        email: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let mut query = customers::table.into_boxed();
        if let Some(email) = email {
            query = query.filter(customers::email.eq(email.to_owned()));
        }
        if let Some(city) = city {
            query = query.filter(customers::city.eq(city.to_owned()));
        }

        let rows = query
            .select(CustomerRow::as_select())
            .order(customers::created_at.asc())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::DieselCustomerRepository;
    use crate::domain::customer::{CustomerUpdate, NewCustomer};
    use crate::domain::errors::DomainError;
    use crate::domain::ports::CustomerRepository;
    use crate::infrastructure::testing::setup_db;

    fn new_customer(email: &str, city: Option<&str>) -> NewCustomer {
        NewCustomer {
            name: "Ada".to_string(),
            email: email.to_string(),
            phone: "555-0100".to_string(),
            city: city.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn create_and_find_roundtrip() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCustomerRepository::new(pool);

        let created = repo
            .create(new_customer("ada@example.com", Some("London")))
            .expect("create failed");

        let by_id = repo
            .find_by_id(created.customer_id)
            .expect("find failed")
            .expect("customer should exist");
        assert_eq!(by_id.email, "ada@example.com");
        assert_eq!(by_id.city.as_deref(), Some("London"));

        let by_email = repo
            .find_by_email("ada@example.com")
            .expect("find failed")
            .expect("customer should exist");
        assert_eq!(by_email.customer_id, created.customer_id);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCustomerRepository::new(pool);

        repo.create(new_customer("dup@example.com", None))
            .expect("first create failed");
        let err = repo
            .create(new_customer("dup@example.com", None))
            .expect_err("second create should fail");

        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_patches_only_supplied_fields() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCustomerRepository::new(pool);

        let created = repo
            .create(new_customer("patch@example.com", Some("London")))
            .expect("create failed");

        let updated = repo
            .update(
                created.customer_id,
                CustomerUpdate {
                    phone: Some("555-0199".to_string()),
                    city: None,
                },
            )
            .expect("update failed")
            .expect("customer should exist");

        assert_eq!(updated.phone, "555-0199");
        assert_eq!(updated.city.as_deref(), Some("London"));
    }

    #[tokio::test]
    async fn search_filters_combine_with_and() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCustomerRepository::new(pool);

        repo.create(new_customer("a@example.com", Some("London")))
            .expect("create failed");
        repo.create(new_customer("b@example.com", Some("Paris")))
            .expect("create failed");

        let both = repo
            .search(Some("a@example.com"), Some("London"))
            .expect("search failed");
        assert_eq!(both.len(), 1);

        let mismatch = repo
            .search(Some("a@example.com"), Some("Paris"))
            .expect("search failed");
        assert!(mismatch.is_empty());

        let city_only = repo.search(None, Some("Paris")).expect("search failed");
        assert_eq!(city_only.len(), 1);
        assert_eq!(city_only[0].email, "b@example.com");
    }

    #[tokio::test]
    async fn delete_returns_the_removed_snapshot() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCustomerRepository::new(pool);

        let created = repo
            .create(new_customer("gone@example.com", None))
            .expect("create failed");

        let deleted = repo
            .delete(created.customer_id)
            .expect("delete failed")
            .expect("snapshot expected");
        assert_eq!(deleted.email, "gone@example.com");

        assert!(repo
            .find_by_id(created.customer_id)
            .expect("find failed")
            .is_none());
    }
}

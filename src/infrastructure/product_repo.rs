use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, Product, ProductUpdate};
use crate::schema::products;

use super::models::{NewProductRow, ProductChanges, ProductRow};

pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for DieselProductRepository {
    fn create(&self, new: NewProduct) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row: ProductRow = diesel::insert_into(products::table)
            .values(&NewProductRow {
                prod_id: Uuid::new_v4(),
                name: new.name,
                sku: new.sku,
                price: new.price,
                stock: Some(new.stock),
                category: new.category,
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn find_by_id(&self, prod_id: Uuid) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .filter(products::prod_id.eq(prod_id))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Product::from))
    }

    fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .filter(products::sku.eq(sku))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Product::from))
    }

    fn update(
        &self,
        prod_id: Uuid,
        changes: ProductUpdate,
    ) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(products::table.filter(products::prod_id.eq(prod_id)))
            .set(&ProductChanges {
                name: changes.name,
                price: changes.price,
                stock: changes.stock,
                category: changes.category,
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        Ok(row.map(Product::from))
    }

    fn delete(&self, prod_id: Uuid) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::delete(products::table.filter(products::prod_id.eq(prod_id)))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        Ok(row.map(Product::from))
    }

    fn list(&self, limit: i64, category: Option<&str>) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let mut query = products::table.into_boxed();
        if let Some(category) = category {
            query = query.filter(products::category.eq(category.to_owned()));
        }

        let rows = query
            .select(ProductRow::as_select())
            .order(products::created_at.asc())
            .limit(limit)
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}

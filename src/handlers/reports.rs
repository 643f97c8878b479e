use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::report_service::{CustomerOrderCount, ProductSales};
use crate::application::ReportService;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::infrastructure::{
    DieselCustomerRepository, DieselOrderRepository, DieselProductRepository,
};

use super::customers::CustomerResponse;

fn service(
    pool: &DbPool,
) -> ReportService<DieselCustomerRepository, DieselProductRepository, DieselOrderRepository> {
    ReportService::new(
        DieselCustomerRepository::new(pool.clone()),
        DieselProductRepository::new(pool.clone()),
        DieselOrderRepository::new(pool.clone()),
    )
}

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductSalesResponse {
    pub prod_id: Uuid,
    pub name: String,
    pub quantity: i64,
}

impl From<ProductSales> for ProductSalesResponse {
    fn from(sales: ProductSales) -> Self {
        ProductSalesResponse {
            prod_id: sales.prod_id,
            name: sales.name,
            quantity: sales.quantity,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueResponse {
    pub total_revenue: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerOrderCountResponse {
    pub customer_id: Uuid,
    pub total_orders: i64,
}

impl From<CustomerOrderCount> for CustomerOrderCountResponse {
    fn from(count: CustomerOrderCount) -> Self {
        CustomerOrderCountResponse {
            customer_id: count.customer_id,
            total_orders: count.total_orders,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TopProductsParams {
    /// How many products to return. Defaults to 5.
    #[serde(default = "default_top_n")]
    pub n: usize,
}

fn default_top_n() -> usize {
    5
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FrequentCustomersParams {
    /// Customers with strictly more orders than this are returned. Defaults to 2.
    #[serde(default = "default_min_orders")]
    pub min_orders: i64,
}

fn default_min_orders() -> i64 {
    2
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /reports/top-products
#[utoipa::path(
    get,
    path = "/reports/top-products",
    params(
        ("n" = Option<usize>, Query, description = "Number of products (default 5)"),
    ),
    responses(
        (status = 200, description = "Best sellers by summed quantity", body = [ProductSalesResponse]),
    ),
    tag = "reports"
)]
pub async fn top_products(
    pool: web::Data<DbPool>,
    query: web::Query<TopProductsParams>,
) -> Result<HttpResponse, AppError> {
    let n = query.n;

    let top = web::block(move || service(&pool).top_selling_products(n))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<ProductSalesResponse> =
        top.into_iter().map(ProductSalesResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /reports/revenue
///
/// Revenue over orders created in the last 30 days.
#[utoipa::path(
    get,
    path = "/reports/revenue",
    responses(
        (status = 200, description = "Total revenue", body = RevenueResponse),
    ),
    tag = "reports"
)]
pub async fn revenue(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let total = web::block(move || service(&pool).total_revenue_last_month())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(RevenueResponse {
        total_revenue: total.to_string(),
    }))
}

/// GET /reports/orders-by-customer
#[utoipa::path(
    get,
    path = "/reports/orders-by-customer",
    responses(
        (status = 200, description = "Order counts per customer", body = [CustomerOrderCountResponse]),
    ),
    tag = "reports"
)]
pub async fn orders_by_customer(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let counts = web::block(move || service(&pool).orders_by_customer())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<CustomerOrderCountResponse> = counts
        .into_iter()
        .map(CustomerOrderCountResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /reports/frequent-customers
#[utoipa::path(
    get,
    path = "/reports/frequent-customers",
    params(
        ("min_orders" = Option<i64>, Query, description = "Strict lower bound on order count (default 2)"),
    ),
    responses(
        (status = 200, description = "Customers above the order-count bound", body = [CustomerResponse]),
    ),
    tag = "reports"
)]
pub async fn frequent_customers(
    pool: web::Data<DbPool>,
    query: web::Query<FrequentCustomersParams>,
) -> Result<HttpResponse, AppError> {
    let min_orders = query.min_orders;

    let customers = web::block(move || service(&pool).frequent_customers(min_orders))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<CustomerResponse> = customers.into_iter().map(CustomerResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

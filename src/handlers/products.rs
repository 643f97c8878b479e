use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ProductService;
use crate::db::DbPool;
use crate::domain::product::{NewProduct, Product};
use crate::errors::AppError;
use crate::infrastructure::DieselProductRepository;

use super::parse_decimal;

fn service(pool: &DbPool) -> ProductService<DieselProductRepository> {
    ProductService::new(DieselProductRepository::new(pool.clone()))
}

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub sku: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    /// Initial stock level. Defaults to 0.
    #[serde(default)]
    pub stock: i32,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RestockRequest {
    /// Units to add to the current stock; must be positive.
    pub delta: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub prod_id: Uuid,
    pub name: String,
    pub sku: String,
    pub price: String,
    pub stock: Option<i32>,
    pub category: Option<String>,
    pub created_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            prod_id: product.prod_id,
            name: product.name,
            sku: product.sku,
            price: product.price.to_string(),
            stock: product.stock,
            category: product.category,
            created_at: product.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListProductsParams {
    /// Maximum number of rows returned. Defaults to 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub category: Option<String>,
}

fn default_limit() -> i64 {
    100
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LowStockParams {
    /// Stock level at or below which a product counts as low. Defaults to 5.
    #[serde(default = "default_threshold")]
    pub threshold: i32,
}

fn default_threshold() -> i32 {
    5
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Non-positive price"),
        (status = 409, description = "SKU already exists"),
    ),
    tag = "products"
)]
pub async fn create_product(
    pool: web::Data<DbPool>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let price = parse_decimal("price", &body.price)?;

    let product = web::block(move || {
        service(&pool).add_product(NewProduct {
            name: body.name,
            sku: body.sku,
            price,
            stock: body.stock,
            category: body.category,
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// GET /products
#[utoipa::path(
    get,
    path = "/products",
    params(
        ("limit" = Option<i64>, Query, description = "Maximum rows (default 100)"),
        ("category" = Option<String>, Query, description = "Exact category filter"),
    ),
    responses(
        (status = 200, description = "Products", body = [ProductResponse]),
    ),
    tag = "products"
)]
pub async fn list_products(
    pool: web::Data<DbPool>,
    query: web::Query<ListProductsParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();

    let products = web::block(move || {
        service(&pool).list_products(params.limit, params.category.as_deref())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /products/{id}/restock
#[utoipa::path(
    post,
    path = "/products/{id}/restock",
    params(
        ("id" = Uuid, Path, description = "Product UUID"),
    ),
    request_body = RestockRequest,
    responses(
        (status = 200, description = "Stock updated", body = ProductResponse),
        (status = 400, description = "Non-positive delta"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn restock_product(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<RestockRequest>,
) -> Result<HttpResponse, AppError> {
    let prod_id = path.into_inner();
    let delta = body.delta;

    let product = web::block(move || service(&pool).restock(prod_id, delta))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// GET /products/low-stock
#[utoipa::path(
    get,
    path = "/products/low-stock",
    params(
        ("threshold" = Option<i32>, Query, description = "Inclusive stock threshold (default 5)"),
    ),
    responses(
        (status = 200, description = "Products at or below the threshold", body = [ProductResponse]),
    ),
    tag = "products"
)]
pub async fn low_stock(
    pool: web::Data<DbPool>,
    query: web::Query<LowStockParams>,
) -> Result<HttpResponse, AppError> {
    let threshold = query.threshold;

    let products = web::block(move || service(&pool).low_stock(threshold))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::CustomerService;
use crate::db::DbPool;
use crate::domain::customer::{Customer, CustomerUpdate, NewCustomer};
use crate::errors::AppError;
use crate::infrastructure::{DieselCustomerRepository, DieselOrderRepository};

fn service(pool: &DbPool) -> CustomerService<DieselCustomerRepository, DieselOrderRepository> {
    CustomerService::new(
        DieselCustomerRepository::new(pool.clone()),
        DieselOrderRepository::new(pool.clone()),
    )
}

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCustomerRequest {
    pub phone: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub customer_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: Option<String>,
    pub created_at: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        CustomerResponse {
            customer_id: customer.customer_id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            city: customer.city,
            created_at: customer.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListCustomersParams {
    /// Maximum number of rows returned. Defaults to 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchCustomersParams {
    pub email: Option<String>,
    pub city: Option<String>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /customers
#[utoipa::path(
    post,
    path = "/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 409, description = "Email already exists"),
    ),
    tag = "customers"
)]
pub async fn create_customer(
    pool: web::Data<DbPool>,
    body: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let customer = web::block(move || {
        service(&pool).add_customer(NewCustomer {
            name: body.name,
            email: body.email,
            phone: body.phone,
            city: body.city,
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CustomerResponse::from(customer)))
}

/// GET /customers
#[utoipa::path(
    get,
    path = "/customers",
    params(
        ("limit" = Option<i64>, Query, description = "Maximum rows (default 100)"),
    ),
    responses(
        (status = 200, description = "Customers", body = [CustomerResponse]),
    ),
    tag = "customers"
)]
pub async fn list_customers(
    pool: web::Data<DbPool>,
    query: web::Query<ListCustomersParams>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit;

    let customers = web::block(move || service(&pool).list_customers(limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<CustomerResponse> = customers.into_iter().map(CustomerResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /customers/search
///
/// Both filters are optional; when both are present they must both match.
#[utoipa::path(
    get,
    path = "/customers/search",
    params(
        ("email" = Option<String>, Query, description = "Exact email"),
        ("city" = Option<String>, Query, description = "Exact city"),
    ),
    responses(
        (status = 200, description = "Matching customers", body = [CustomerResponse]),
    ),
    tag = "customers"
)]
pub async fn search_customers(
    pool: web::Data<DbPool>,
    query: web::Query<SearchCustomersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();

    let customers = web::block(move || {
        service(&pool).search_customers(params.email.as_deref(), params.city.as_deref())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<CustomerResponse> = customers.into_iter().map(CustomerResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// PUT /customers/{id}
#[utoipa::path(
    put,
    path = "/customers/{id}",
    params(
        ("id" = Uuid, Path, description = "Customer UUID"),
    ),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 400, description = "No updatable fields supplied"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn update_customer(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let body = body.into_inner();

    let customer = web::block(move || {
        service(&pool).update_customer(
            customer_id,
            CustomerUpdate {
                phone: body.phone,
                city: body.city,
            },
        )
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

/// DELETE /customers/{id}
///
/// Returns the deleted snapshot. Blocked while the customer owns orders.
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    params(
        ("id" = Uuid, Path, description = "Customer UUID"),
    ),
    responses(
        (status = 200, description = "Customer deleted", body = CustomerResponse),
        (status = 404, description = "Customer not found"),
        (status = 409, description = "Customer has orders"),
    ),
    tag = "customers"
)]
pub async fn delete_customer(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();

    let customer = web::block(move || service(&pool).delete_customer(customer_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

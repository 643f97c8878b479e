use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::OrderService;
use crate::db::DbPool;
use crate::domain::order::{Order, OrderDetails, OrderItem, OrderItemRequest};
use crate::errors::AppError;
use crate::infrastructure::{
    DieselCustomerRepository, DieselOrderRepository, DieselProductRepository,
};

use super::customers::CustomerResponse;

fn service(
    pool: &DbPool,
) -> OrderService<DieselCustomerRepository, DieselProductRepository, DieselOrderRepository> {
    OrderService::new(
        DieselCustomerRepository::new(pool.clone()),
        DieselProductRepository::new(pool.clone()),
        DieselOrderRepository::new(pool.clone()),
    )
}

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderItemRequest {
    pub prod_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub items: Vec<CreateOrderItemRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub total_amount: Option<String>,
    pub status: String,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id,
            customer_id: order.customer_id,
            total_amount: order.total_amount.map(|a| a.to_string()),
            status: order.status.as_str().to_string(),
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub prod_id: Uuid,
    pub quantity: i32,
    pub unit_price: String,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            id: item.id,
            prod_id: item.prod_id,
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailsResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub total_amount: Option<String>,
    pub status: String,
    pub created_at: String,
    pub customer: Option<CustomerResponse>,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderDetails> for OrderDetailsResponse {
    fn from(details: OrderDetails) -> Self {
        OrderDetailsResponse {
            id: details.order.id,
            customer_id: details.order.customer_id,
            total_amount: details.order.total_amount.map(|a| a.to_string()),
            status: details.order.status.as_str().to_string(),
            created_at: details.order.created_at.to_rfc3339(),
            customer: details.customer.map(CustomerResponse::from),
            items: details.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    pub customer_id: Uuid,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Places an order. Stock is deducted per line as the request is walked;
/// a failing line aborts the order but leaves earlier deductions in place.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 404, description = "Customer or product not found"),
        (status = 409, description = "Not enough stock"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    pool: web::Data<DbPool>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let customer_id = body.customer_id;
    let items: Vec<OrderItemRequest> = body
        .items
        .into_iter()
        .map(|i| OrderItemRequest {
            prod_id: i.prod_id,
            quantity: i.quantity,
        })
        .collect();

    let order = web::block(move || service(&pool).create_order(customer_id, &items))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders/{id}
///
/// Returns the order joined with its customer record and item lines.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order details", body = OrderDetailsResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let details = web::block(move || service(&pool).order_details(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderDetailsResponse::from(details)))
}

/// POST /orders/{id}/cancel
#[utoipa::path(
    post,
    path = "/orders/{id}/cancel",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order cancelled, stock restored", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is not PLACED"),
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || service(&pool).cancel_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// POST /orders/{id}/complete
#[utoipa::path(
    post,
    path = "/orders/{id}/complete",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order completed", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is not PLACED"),
    ),
    tag = "orders"
)]
pub async fn complete_order(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || service(&pool).complete_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /orders?customer_id=...
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("customer_id" = Uuid, Query, description = "Customer UUID"),
    ),
    responses(
        (status = 200, description = "Orders for the customer", body = [OrderResponse]),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    pool: web::Data<DbPool>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let customer_id = query.customer_id;

    let orders = web::block(move || service(&pool).orders_by_customer(customer_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

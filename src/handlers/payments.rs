use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::PaymentService;
use crate::db::DbPool;
use crate::domain::payment::Payment;
use crate::errors::AppError;
use crate::infrastructure::{DieselOrderRepository, DieselPaymentRepository};

fn service(pool: &DbPool) -> PaymentService<DieselOrderRepository, DieselPaymentRepository> {
    PaymentService::new(
        DieselOrderRepository::new(pool.clone()),
        DieselPaymentRepository::new(pool.clone()),
    )
}

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessPaymentRequest {
    pub method: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub payment_id: Uuid,
    pub order_id: Uuid,
    pub amount: String,
    pub status: String,
    pub method: Option<String>,
    pub created_at: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        PaymentResponse {
            payment_id: payment.payment_id,
            order_id: payment.order_id,
            amount: payment.amount.to_string(),
            status: payment.status.as_str().to_string(),
            method: payment.method,
            created_at: payment.created_at.to_rfc3339(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /payments/{order_id}
///
/// Opens a PENDING payment over the order's total.
#[utoipa::path(
    post,
    path = "/payments/{order_id}",
    params(
        ("order_id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 201, description = "Payment created", body = PaymentResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "payments"
)]
pub async fn create_payment(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let payment = web::block(move || service(&pool).create_payment(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(PaymentResponse::from(payment)))
}

/// POST /payments/{order_id}/process
///
/// Marks the payment PAID and the order COMPLETED.
#[utoipa::path(
    post,
    path = "/payments/{order_id}/process",
    params(
        ("order_id" = Uuid, Path, description = "Order UUID"),
    ),
    request_body = ProcessPaymentRequest,
    responses(
        (status = 200, description = "Payment processed", body = PaymentResponse),
        (status = 404, description = "No payment for the order"),
        (status = 409, description = "Payment is not PENDING"),
    ),
    tag = "payments"
)]
pub async fn process_payment(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<ProcessPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let method = body.into_inner().method;

    let payment = web::block(move || service(&pool).process_payment(order_id, &method))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(PaymentResponse::from(payment)))
}

/// POST /payments/{order_id}/refund
#[utoipa::path(
    post,
    path = "/payments/{order_id}/refund",
    params(
        ("order_id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Payment refunded", body = PaymentResponse),
        (status = 404, description = "No payment for the order"),
    ),
    tag = "payments"
)]
pub async fn refund_payment(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let payment = web::block(move || service(&pool).refund_payment(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(PaymentResponse::from(payment)))
}

pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::customers::create_customer,
        handlers::customers::list_customers,
        handlers::customers::search_customers,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::restock_product,
        handlers::products::low_stock,
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::cancel_order,
        handlers::orders::complete_order,
        handlers::orders::list_orders,
        handlers::payments::create_payment,
        handlers::payments::process_payment,
        handlers::payments::refund_payment,
        handlers::reports::top_products,
        handlers::reports::revenue,
        handlers::reports::orders_by_customer,
        handlers::reports::frequent_customers,
    ),
    components(schemas(
        handlers::customers::CreateCustomerRequest,
        handlers::customers::UpdateCustomerRequest,
        handlers::customers::CustomerResponse,
        handlers::products::CreateProductRequest,
        handlers::products::RestockRequest,
        handlers::products::ProductResponse,
        handlers::orders::CreateOrderItemRequest,
        handlers::orders::CreateOrderRequest,
        handlers::orders::OrderResponse,
        handlers::orders::OrderItemResponse,
        handlers::orders::OrderDetailsResponse,
        handlers::payments::ProcessPaymentRequest,
        handlers::payments::PaymentResponse,
        handlers::reports::ProductSalesResponse,
        handlers::reports::RevenueResponse,
        handlers::reports::CustomerOrderCountResponse,
    )),
    tags(
        (name = "customers"),
        (name = "products"),
        (name = "orders"),
        (name = "payments"),
        (name = "reports"),
    )
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/customers")
                    .route("", web::post().to(handlers::customers::create_customer))
                    .route("", web::get().to(handlers::customers::list_customers))
                    .route("/search", web::get().to(handlers::customers::search_customers))
                    .route("/{id}", web::put().to(handlers::customers::update_customer))
                    .route("/{id}", web::delete().to(handlers::customers::delete_customer)),
            )
            .service(
                web::scope("/products")
                    .route("", web::post().to(handlers::products::create_product))
                    .route("", web::get().to(handlers::products::list_products))
                    .route("/low-stock", web::get().to(handlers::products::low_stock))
                    .route("/{id}/restock", web::post().to(handlers::products::restock_product)),
            )
            .service(
                web::scope("/orders")
                    .route("", web::post().to(handlers::orders::create_order))
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("/{id}", web::get().to(handlers::orders::get_order))
                    .route("/{id}/cancel", web::post().to(handlers::orders::cancel_order))
                    .route("/{id}/complete", web::post().to(handlers::orders::complete_order)),
            )
            .service(
                web::scope("/payments")
                    .route("/{order_id}", web::post().to(handlers::payments::create_payment))
                    .route("/{order_id}/process", web::post().to(handlers::payments::process_payment))
                    .route("/{order_id}/refund", web::post().to(handlers::payments::refund_payment)),
            )
            .service(
                web::scope("/reports")
                    .route("/top-products", web::get().to(handlers::reports::top_products))
                    .route("/revenue", web::get().to(handlers::reports::revenue))
                    .route(
                        "/orders-by-customer",
                        web::get().to(handlers::reports::orders_by_customer),
                    )
                    .route(
                        "/frequent-customers",
                        web::get().to(handlers::reports::frequent_customers),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}

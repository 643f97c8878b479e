pub mod customer_service;
pub mod order_service;
pub mod payment_service;
pub mod product_service;
pub mod report_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use customer_service::CustomerService;
pub use order_service::OrderService;
pub use payment_service::PaymentService;
pub use product_service::ProductService;
pub use report_service::ReportService;

pub mod driver_repository;
pub mod expense_repository;
pub mod quote_repository;
pub mod service_repository;
pub mod user_repository;
pub mod vehicle_repository;

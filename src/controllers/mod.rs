//! Controladores: validan requests y orquestan repositorios y servicios

pub mod auth_controller;
pub mod dashboard_controller;
pub mod driver_controller;
pub mod expense_controller;
pub mod invoice_controller;
pub mod quote_controller;
pub mod service_controller;
pub mod vehicle_controller;

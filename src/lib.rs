//! Back-office de una empresa de turismo y transporte
//!
//! API HTTP (axum + sqlx) para orçamentos, frota, motoristas, servicios,
//! faturas y control de gastos.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;

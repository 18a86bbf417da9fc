//! Routers por recurso, montados bajo `/api/<recurso>`

pub mod auth_routes;
pub mod dashboard_routes;
pub mod driver_routes;
pub mod expense_routes;
pub mod invoice_routes;
pub mod quote_routes;
pub mod service_routes;
pub mod vehicle_routes;

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{auth_middleware, cors_layer};
use crate::state::AppState;

/// Peticiones simultáneas máximas antes de encolar
const MAX_CONCURRENT_REQUESTS: usize = 256;

/// Router completo de la API
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/api/expenses", expense_routes::create_expense_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/drivers", driver_routes::create_driver_router())
        .nest("/api/services", service_routes::create_service_router())
        .nest("/api/invoices", invoice_routes::create_invoice_router())
        .nest("/api/dashboard", dashboard_routes::create_dashboard_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes::create_auth_router(state.clone()))
        .nest("/api/users", auth_routes::create_user_router(state.clone()))
        .nest("/api/quotes", quote_routes::create_quote_router(state.clone()))
        .merge(protected)
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

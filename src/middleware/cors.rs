//! Middleware de CORS

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::config::environment::EnvironmentConfig;

/// CORS según `CORS_ORIGINS`; sin orígenes configurados es permisivo solo en desarrollo
pub fn cors_layer(config: &EnvironmentConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        if config.is_development() {
            return CorsLayer::very_permissive();
        }
        warn!("⚠️ CORS_ORIGINS vacío fuera de desarrollo: no se aceptan orígenes externos");
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("⚠️ Origen CORS inválido ignorado: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([
            header::CONTENT_DISPOSITION,
            header::HeaderName::from_static("x-export-rows"),
            header::HeaderName::from_static("x-export-total"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::service_controller::ServiceController;
use crate::dto::service_dto::{CreateServiceRequest, ServiceFilters, UpdateServiceRequest};
use crate::dto::ApiResponse;
use crate::models::service::Service;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_service_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services).post(create_service))
        .route("/:id", get(get_service).put(update_service).delete(delete_service))
}

fn controller(state: &AppState) -> ServiceController {
    ServiceController::new(state.pool.clone())
}

async fn create_service(
    State(state): State<AppState>,
    Json(request): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Service>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_services(
    State(state): State<AppState>,
    Query(filters): Query<ServiceFilters>,
) -> Result<Json<ApiResponse<Vec<Service>>>, AppError> {
    Ok(Json(controller(&state).list(&filters).await?))
}

async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Service>>, AppError> {
    Ok(Json(controller(&state).get(id).await?))
}

async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateServiceRequest>,
) -> Result<Json<ApiResponse<Service>>, AppError> {
    Ok(Json(controller(&state).update(id, request).await?))
}

async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    Ok(Json(controller(&state).delete(id).await?))
}

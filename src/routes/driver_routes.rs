use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverRequest};
use crate::dto::ApiResponse;
use crate::models::driver::Driver;
use crate::services::photo_storage::MAX_PHOTO_BYTES;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route("/:id", get(get_driver).put(update_driver).delete(delete_driver))
        .route(
            "/:id/photo",
            put(upload_photo)
                .route_layer(DefaultBodyLimit::max(MAX_PHOTO_BYTES))
                .get(get_photo),
        )
}

fn controller(state: &AppState) -> DriverController {
    DriverController::new(state.pool.clone(), state.photos.clone())
}

async fn create_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Driver>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_drivers(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Driver>>>, AppError> {
    Ok(Json(controller(&state).list().await?))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    Ok(Json(controller(&state).get(id).await?))
}

async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    Ok(Json(controller(&state).update(id, request).await?))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    Ok(Json(controller(&state).delete(id).await?))
}

/// Cuerpo crudo de la imagen; el tipo sale de Content-Type
async fn upload_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Content-Type header is required".to_string()))?;
    Ok(Json(controller(&state).upload_photo(id, content_type, &body).await?))
}

async fn get_photo(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<impl IntoResponse, AppError> {
    let photo = controller(&state).photo(id).await?;
    Ok(([(header::CONTENT_TYPE, photo.content_type)], photo.bytes))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, patch},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::quote_controller::QuoteController;
use crate::dto::quote_dto::{CreateQuoteRequest, QuoteFilters, UpdateQuoteRequest, UpdateQuoteStatusRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth_middleware;
use crate::models::quote::Quote;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// `POST /` es público (formulario del sitio); el resto requiere token
pub fn create_quote_router(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, auth_middleware);
    Router::new()
        .route("/", get(list_quotes).route_layer(auth.clone()).post(create_quote))
        .route(
            "/:id",
            get(get_quote)
                .put(update_quote)
                .delete(delete_quote)
                .route_layer(auth.clone()),
        )
        .route("/:id/status", patch(update_quote_status).route_layer(auth))
}

fn controller(state: &AppState) -> QuoteController {
    QuoteController::new(state.pool.clone())
}

async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Quote>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_quotes(
    State(state): State<AppState>,
    Query(filters): Query<QuoteFilters>,
) -> Result<Json<ApiResponse<Vec<Quote>>>, AppError> {
    Ok(Json(controller(&state).list(&filters).await?))
}

async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Quote>>, AppError> {
    Ok(Json(controller(&state).get(id).await?))
}

async fn update_quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateQuoteRequest>,
) -> Result<Json<ApiResponse<Quote>>, AppError> {
    Ok(Json(controller(&state).update(id, request).await?))
}

async fn update_quote_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateQuoteStatusRequest>,
) -> Result<Json<ApiResponse<Quote>>, AppError> {
    Ok(Json(controller(&state).set_status(id, request).await?))
}

async fn delete_quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    Ok(Json(controller(&state).delete(id).await?))
}

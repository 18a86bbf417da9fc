use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::controllers::invoice_controller::InvoiceController;
use crate::dto::invoice_dto::CreateInvoiceRequest;
use crate::dto::ApiResponse;
use crate::services::invoice::Invoice;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_invoice_router() -> Router<AppState> {
    Router::new().route("/", post(create_invoice))
}

async fn create_invoice(
    State(state): State<AppState>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Invoice>>), AppError> {
    let response = InvoiceController::new(state.pool.clone())
        .create(request, state.today())
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

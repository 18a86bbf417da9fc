use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::expense_controller::ExpenseController;
use crate::dto::expense_dto::{
    CreateExpenseRequest, DeletedGroupResponse, ExpenseChartsResponse, ExpenseListResponse, ExpenseResponse,
    PayExpenseRequest, UpdateExpenseRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::services::expense_filter::ExpenseFilters;
use crate::services::expense_report::ExpenseSummary;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de gastos; se montan detrás de `auth_middleware`
pub fn create_expense_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/summary", get(expense_summary))
        .route("/charts", get(expense_charts))
        .route("/export", get(export_expenses))
        .route("/group/:group_id", delete(delete_group))
        .route("/:id", get(get_expense).put(update_expense).delete(delete_expense))
        .route("/:id/pay", post(pay_expense))
}

fn controller(state: &AppState) -> ExpenseController {
    ExpenseController::new(state.pool.clone())
}

async fn list_expenses(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<ExpenseFilters>,
) -> Result<Json<ApiResponse<ExpenseListResponse>>, AppError> {
    Ok(Json(controller(&state).list(&user, &filters, state.today()).await?))
}

async fn expense_summary(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<ExpenseFilters>,
) -> Result<Json<ApiResponse<ExpenseSummary>>, AppError> {
    Ok(Json(controller(&state).summary(&user, &filters, state.today()).await?))
}

async fn expense_charts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<ExpenseFilters>,
) -> Result<Json<ApiResponse<ExpenseChartsResponse>>, AppError> {
    Ok(Json(controller(&state).charts(&user, &filters, state.today()).await?))
}

/// Planilla CSV de los gastos filtrados
async fn export_expenses(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<ExpenseFilters>,
) -> Result<impl IntoResponse, AppError> {
    let today = state.today();
    let export = controller(&state).export(&user, &filters, today).await?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"despesas-{}.csv\"", today.format("%Y-%m-%d")),
        ),
        (HeaderName::from_static("x-export-rows"), export.row_count().to_string()),
        (HeaderName::from_static("x-export-total"), export.total.round_dp(2).to_string()),
    ];
    Ok((StatusCode::OK, headers, export.to_csv()))
}

async fn get_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ExpenseResponse>>, AppError> {
    Ok(Json(controller(&state).get(&user, id, state.today()).await?))
}

async fn create_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<ExpenseResponse>>>), AppError> {
    let response = controller(&state).create(&user, request, state.today()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<Json<ApiResponse<ExpenseResponse>>, AppError> {
    Ok(Json(controller(&state).update(&user, id, request, state.today()).await?))
}

async fn pay_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    request: Option<Json<PayExpenseRequest>>,
) -> Result<Json<ApiResponse<ExpenseResponse>>, AppError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    Ok(Json(controller(&state).pay(&user, id, request, state.today()).await?))
}

async fn delete_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    Ok(Json(controller(&state).delete(&user, id).await?))
}

async fn delete_group(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedGroupResponse>>, AppError> {
    Ok(Json(controller(&state).delete_group(&user, group_id).await?))
}

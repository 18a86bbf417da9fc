use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::expense_dto::{
    CreateExpenseRequest, DeletedGroupResponse, ExpenseChartsResponse, ExpenseListResponse, ExpenseResponse,
    PayExpenseRequest, UpdateExpenseRequest,
};
use crate::dto::{patch, ApiResponse};
use crate::middleware::AuthenticatedUser;
use crate::models::expense::{reference_month, Expense, NewExpense};
use crate::repositories::expense_repository::ExpenseRepository;
use crate::services::expense_filter::{self, ExpenseFilters};
use crate::services::expense_report::{self, normalize_category, ExpenseExport, ExpenseSummary};
use crate::services::recurrence;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::clean_optional;

pub struct ExpenseController {
    repository: ExpenseRepository,
}

impl ExpenseController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ExpenseRepository::new(pool),
        }
    }

    /// Gastos visibles para el usuario que cumplen los filtros
    async fn filtered(
        &self,
        actor: &AuthenticatedUser,
        filters: &ExpenseFilters,
        today: NaiveDate,
    ) -> Result<Vec<Expense>, AppError> {
        // compilar antes de consultar para rechazar filtros inválidos sin tocar la base
        filters.compile()?;
        let expenses = self.repository.list(actor.owner_scope()).await?;
        expense_filter::apply(expenses, filters, today)
    }

    /// Gasto existente y visible; el staff no ve gastos ajenos
    async fn visible(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<Expense, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|e| actor.owner_scope().map_or(true, |owner| e.user_id == owner))
            .ok_or_else(|| not_found_error("Expense", &id.to_string()))
    }

    pub async fn list(
        &self,
        actor: &AuthenticatedUser,
        filters: &ExpenseFilters,
        today: NaiveDate,
    ) -> Result<ApiResponse<ExpenseListResponse>, AppError> {
        let expenses = self.filtered(actor, filters, today).await?;
        let summary = expense_report::summarize(&expenses, today);
        let items = expenses
            .into_iter()
            .map(|e| ExpenseResponse::new(e, today))
            .collect();
        Ok(ApiResponse::success(ExpenseListResponse { items, summary }))
    }

    pub async fn summary(
        &self,
        actor: &AuthenticatedUser,
        filters: &ExpenseFilters,
        today: NaiveDate,
    ) -> Result<ApiResponse<ExpenseSummary>, AppError> {
        let expenses = self.filtered(actor, filters, today).await?;
        Ok(ApiResponse::success(expense_report::summarize(&expenses, today)))
    }

    pub async fn charts(
        &self,
        actor: &AuthenticatedUser,
        filters: &ExpenseFilters,
        today: NaiveDate,
    ) -> Result<ApiResponse<ExpenseChartsResponse>, AppError> {
        let expenses = self.filtered(actor, filters, today).await?;
        Ok(ApiResponse::success(ExpenseChartsResponse {
            by_category: expense_report::chart_by_category(&expenses),
            by_month: expense_report::chart_by_month(&expenses, today),
        }))
    }

    pub async fn export(
        &self,
        actor: &AuthenticatedUser,
        filters: &ExpenseFilters,
        today: NaiveDate,
    ) -> Result<ExpenseExport, AppError> {
        let expenses = self.filtered(actor, filters, today).await?;
        let export = ExpenseExport::build(&expenses, today);
        info!("📤 Exportación de {} gastos (total {})", export.row_count(), export.total);
        Ok(export)
    }

    pub async fn get(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        today: NaiveDate,
    ) -> Result<ApiResponse<ExpenseResponse>, AppError> {
        let expense = self.visible(actor, id).await?;
        Ok(ApiResponse::success(ExpenseResponse::new(expense, today)))
    }

    /// Crear un gasto, o todas sus cuotas si es recurrente
    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateExpenseRequest,
        today: NaiveDate,
    ) -> Result<ApiResponse<Vec<ExpenseResponse>>, AppError> {
        request.validate()?;

        let base = NewExpense {
            user_id: actor.user_id,
            name: request.name.trim().to_string(),
            amount: request.amount,
            category: normalize_category(&request.category),
            subcategory: clean_optional(request.subcategory),
            company: clean_optional(request.company),
            payment_method: clean_optional(request.payment_method),
            due_date: request.due_date,
            payment_date: request.payment_date,
            recurring: false,
            reference_month: None,
            recurrence_group_id: None,
            installment_number: None,
            installment_total: None,
            notes: clean_optional(request.notes),
        };

        let drafts = match request.installments {
            Some(count) => recurrence::expand_installments(&base, count)?,
            None => vec![recurrence::single(base)],
        };

        let created = self.repository.create_many(&drafts).await?;
        info!("💸 {} gasto(s) creado(s) por {}", created.len(), actor.user_id);

        let message = if created.len() > 1 {
            format!("{} cuotas creadas", created.len())
        } else {
            "Gasto creado exitosamente".to_string()
        };
        let items = created
            .into_iter()
            .map(|e| ExpenseResponse::new(e, today))
            .collect();
        Ok(ApiResponse::success_with_message(items, message))
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateExpenseRequest,
        today: NaiveDate,
    ) -> Result<ApiResponse<ExpenseResponse>, AppError> {
        request.validate()?;
        let current = self.visible(actor, id).await?;

        let due_date = request.due_date.unwrap_or(current.due_date);
        let merged = NewExpense {
            user_id: current.user_id,
            name: request.name.map(|n| n.trim().to_string()).unwrap_or(current.name),
            amount: request.amount.unwrap_or(current.amount),
            category: request.category.map(|c| normalize_category(&c)).unwrap_or(current.category),
            subcategory: clean_optional(patch(current.subcategory, request.subcategory)),
            company: clean_optional(patch(current.company, request.company)),
            payment_method: clean_optional(patch(current.payment_method, request.payment_method)),
            due_date,
            payment_date: patch(current.payment_date, request.payment_date),
            recurring: current.recurring,
            reference_month: Some(reference_month(due_date)),
            recurrence_group_id: current.recurrence_group_id,
            installment_number: current.installment_number,
            installment_total: current.installment_total,
            notes: clean_optional(patch(current.notes, request.notes)),
        };

        let updated = self.repository.update(id, &merged).await?;
        Ok(ApiResponse::success_with_message(
            ExpenseResponse::new(updated, today),
            "Gasto actualizado",
        ))
    }

    /// Registrar el pago; sin fecha se usa hoy
    pub async fn pay(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: PayExpenseRequest,
        today: NaiveDate,
    ) -> Result<ApiResponse<ExpenseResponse>, AppError> {
        self.visible(actor, id).await?;
        let payment_date = request.payment_date.unwrap_or(today);
        let updated = self.repository.set_payment_date(id, Some(payment_date)).await?;
        info!("✅ Gasto {} pagado el {}", id, payment_date);
        Ok(ApiResponse::success(ExpenseResponse::new(updated, today)))
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        self.visible(actor, id).await?;
        self.repository.delete(id).await?;
        Ok(ApiResponse::message("Gasto eliminado"))
    }

    pub async fn delete_group(
        &self,
        actor: &AuthenticatedUser,
        group_id: Uuid,
    ) -> Result<ApiResponse<DeletedGroupResponse>, AppError> {
        let deleted = self.repository.delete_group(group_id, actor.owner_scope()).await?;
        if deleted == 0 {
            return Err(not_found_error("Recurrence group", &group_id.to_string()));
        }
        info!("🗑️ {} cuotas del grupo {} eliminadas", deleted, group_id);
        Ok(ApiResponse::success(DeletedGroupResponse {
            recurrence_group_id: group_id,
            deleted,
        }))
    }
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::double_option;
use crate::models::expense::{Expense, ExpenseStatus};
use crate::services::expense_report::{CategoryTotal, ExpenseSummary, MonthBucket};

// Request para crear un gasto (o sus cuotas si `installments` está presente)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    #[validate(length(min = 1, max = 200), custom = "crate::utils::validation::validate_not_blank")]
    pub name: String,

    #[validate(custom = "crate::utils::validation::validate_positive_amount")]
    pub amount: Decimal,

    #[validate(length(min = 1, max = 100), custom = "crate::utils::validation::validate_not_blank")]
    pub category: String,

    #[validate(length(max = 100))]
    pub subcategory: Option<String>,

    #[validate(length(max = 200))]
    pub company: Option<String>,

    #[validate(length(max = 50))]
    pub payment_method: Option<String>,

    pub due_date: NaiveDate,

    pub payment_date: Option<NaiveDate>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,

    /// Cantidad de cuotas mensuales; ausente = gasto único
    #[validate(range(min = 1, max = 60))]
    pub installments: Option<u32>,
}

// Request para actualizar un gasto existente
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateExpenseRequest {
    #[validate(length(min = 1, max = 200), custom = "crate::utils::validation::validate_not_blank")]
    pub name: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_positive_amount")]
    pub amount: Option<Decimal>,

    #[validate(length(min = 1, max = 100), custom = "crate::utils::validation::validate_not_blank")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub subcategory: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub company: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub payment_method: Option<Option<String>>,

    pub due_date: Option<NaiveDate>,

    /// `null` borra la fecha de pago
    #[serde(default, deserialize_with = "double_option")]
    pub payment_date: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

// Request para marcar un gasto como pagado
#[derive(Debug, Default, Deserialize)]
pub struct PayExpenseRequest {
    /// Por defecto, hoy
    pub payment_date: Option<NaiveDate>,
}

// Response de gasto con su estado derivado
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseResponse {
    #[serde(flatten)]
    pub expense: Expense,
    pub status: ExpenseStatus,
}

impl ExpenseResponse {
    pub fn new(expense: Expense, today: NaiveDate) -> Self {
        let status = expense.status(today);
        Self { expense, status }
    }
}

// Listado filtrado con sus tarjetas de resumen
#[derive(Debug, Serialize)]
pub struct ExpenseListResponse {
    pub items: Vec<ExpenseResponse>,
    pub summary: ExpenseSummary,
}

#[derive(Debug, Serialize)]
pub struct ExpenseChartsResponse {
    pub by_category: Vec<CategoryTotal>,
    pub by_month: Vec<MonthBucket>,
}

#[derive(Debug, Serialize)]
pub struct DeletedGroupResponse {
    pub recurrence_group_id: Uuid,
    pub deleted: u64,
}

//! Modelo de Expense
//!
//! Gastos de la empresa. El estado (pago/pendente/vencido/programado) no se
//! guarda: se deriva de las fechas en cada lectura.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

use crate::services::expense_status;

/// Estado derivado de un gasto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// Pago con fecha de pago ya alcanzada
    Pago,
    /// Pago agendado para una fecha futura
    Programado,
    /// Sin pago y con vencimiento pasado
    Vencido,
    Pendente,
}

impl ExpenseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseStatus::Pago => "pago",
            ExpenseStatus::Programado => "programado",
            ExpenseStatus::Vencido => "vencido",
            ExpenseStatus::Pendente => "pendente",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expense - mapea a la tabla expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub amount: Decimal,
    pub category: String,
    pub subcategory: Option<String>,
    pub company: Option<String>,
    pub payment_method: Option<String>,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub recurring: bool,
    pub reference_month: Option<String>,
    pub recurrence_group_id: Option<Uuid>,
    pub installment_number: Option<i32>,
    pub installment_total: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn status(&self, today: NaiveDate) -> ExpenseStatus {
        expense_status::classify(self.due_date, self.payment_date, today)
    }
}

/// Gasto listo para insertar
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub user_id: Uuid,
    pub name: String,
    pub amount: Decimal,
    pub category: String,
    pub subcategory: Option<String>,
    pub company: Option<String>,
    pub payment_method: Option<String>,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub recurring: bool,
    pub reference_month: Option<String>,
    pub recurrence_group_id: Option<Uuid>,
    pub installment_number: Option<i32>,
    pub installment_total: Option<i32>,
    pub notes: Option<String>,
}

/// Mes de referencia YYYY-MM de una fecha
pub fn reference_month(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ExpenseStatus::Vencido).unwrap(), "\"vencido\"");
        let parsed: ExpenseStatus = serde_json::from_str("\"programado\"").unwrap();
        assert_eq!(parsed, ExpenseStatus::Programado);
    }

    #[test]
    fn test_reference_month() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(reference_month(date), "2025-03");
    }
}

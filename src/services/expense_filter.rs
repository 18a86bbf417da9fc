//! Filtros de la lista de gastos
//!
//! Los filtros activos se combinan con AND. Las cadenas vacías se
//! consideran filtros inactivos.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::expense::{Expense, ExpenseStatus};
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::month_bounds;

/// Filtros aceptados por `GET /api/expenses` y derivados
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseFilters {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub status: Option<ExpenseStatus>,
    pub company: Option<String>,
    pub payment_method: Option<String>,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
    /// YYYY-MM sobre la fecha de vencimiento
    pub month: Option<String>,
    pub search: Option<String>,
}

/// Filtros ya normalizados, listos para aplicarse
#[derive(Debug, Clone, Default)]
pub struct CompiledFilters {
    category: Option<String>,
    subcategory: Option<String>,
    status: Option<ExpenseStatus>,
    company: Option<String>,
    payment_method: Option<String>,
    due_from: Option<NaiveDate>,
    due_to: Option<NaiveDate>,
    search: Option<String>,
}

fn normalized(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn field_matches(filter: &Option<String>, value: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(expected) => value
            .map(|v| v.trim().to_lowercase() == *expected)
            .unwrap_or(false),
    }
}

impl ExpenseFilters {
    /// Validar y normalizar los filtros
    pub fn compile(&self) -> Result<CompiledFilters, AppError> {
        let mut due_from = self.due_from;
        let mut due_to = self.due_to;

        if let Some(month) = self.month.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            let (first, last) =
                month_bounds(month).ok_or_else(|| validation_error("month", "month must be YYYY-MM"))?;
            due_from = Some(due_from.map_or(first, |from| from.max(first)));
            due_to = Some(due_to.map_or(last, |to| to.min(last)));
        }

        Ok(CompiledFilters {
            category: normalized(&self.category),
            subcategory: normalized(&self.subcategory),
            status: self.status,
            company: normalized(&self.company),
            payment_method: normalized(&self.payment_method),
            due_from,
            due_to,
            search: normalized(&self.search),
        })
    }
}

impl CompiledFilters {
    pub fn matches(&self, expense: &Expense, today: NaiveDate) -> bool {
        field_matches(&self.category, Some(&expense.category))
            && field_matches(&self.subcategory, expense.subcategory.as_deref())
            && field_matches(&self.company, expense.company.as_deref())
            && field_matches(&self.payment_method, expense.payment_method.as_deref())
            && self.due_from.map_or(true, |from| expense.due_date >= from)
            && self.due_to.map_or(true, |to| expense.due_date <= to)
            && self
                .search
                .as_ref()
                .map_or(true, |needle| expense.name.to_lowercase().contains(needle))
            && self.status.map_or(true, |status| expense.status(today) == status)
    }
}

/// Aplicar los filtros conservando el orden de entrada
pub fn apply(expenses: Vec<Expense>, filters: &ExpenseFilters, today: NaiveDate) -> Result<Vec<Expense>, AppError> {
    let compiled = filters.compile()?;
    Ok(expenses
        .into_iter()
        .filter(|expense| compiled.matches(expense, today))
        .collect())
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn names(list: &[Expense]) -> Vec<&str> {
        list.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let result = apply(ten_expenses(), &ExpenseFilters::default(), today()).unwrap();
        assert_eq!(result.len(), 10);
    }

    #[test]
    fn test_category_and_status_conjunction() {
        let filters = ExpenseFilters {
            category: Some("veiculo".to_string()),
            status: Some(ExpenseStatus::Vencido),
            ..Default::default()
        };
        let result = apply(ten_expenses(), &filters, today()).unwrap();
        assert_eq!(names(&result), vec!["Combustível ônibus", "Pneus van", "Pedágio"]);
        assert!(result
            .iter()
            .all(|e| e.category == "veiculo" && e.status(today()) == ExpenseStatus::Vencido));
    }

    #[test]
    fn test_company_and_payment_method_are_case_insensitive() {
        let filters = ExpenseFilters {
            company: Some("  posto shell ".to_string()),
            payment_method: Some("PIX".to_string()),
            ..Default::default()
        };
        let result = apply(ten_expenses(), &filters, today()).unwrap();
        assert_eq!(names(&result), vec!["Combustível ônibus"]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filters = ExpenseFilters {
            due_from: Some(d(2025, 6, 5)),
            due_to: Some(d(2025, 6, 15)),
            ..Default::default()
        };
        let result = apply(ten_expenses(), &filters, today()).unwrap();
        assert_eq!(
            names(&result),
            vec!["Pneus van", "Aluguel escritório", "Salário motorista", "Seguro frota"]
        );
    }

    #[test]
    fn test_month_filter_intersects_with_range() {
        let filters = ExpenseFilters {
            month: Some("2025-06".to_string()),
            due_from: Some(d(2025, 6, 20)),
            ..Default::default()
        };
        let result = apply(ten_expenses(), &filters, today()).unwrap();
        assert_eq!(names(&result), vec!["Revisão micro", "Internet"]);
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let filters = ExpenseFilters {
            month: Some("06/2025".to_string()),
            ..Default::default()
        };
        assert!(apply(ten_expenses(), &filters, today()).is_err());
    }

    #[test]
    fn test_empty_strings_are_inactive() {
        let filters = ExpenseFilters {
            category: Some("   ".to_string()),
            search: Some(String::new()),
            month: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(apply(ten_expenses(), &filters, today()).unwrap().len(), 10);
    }

    #[test]
    fn test_search_by_name_and_missing_optional_field() {
        let filters = ExpenseFilters {
            search: Some("SEGURO".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&apply(ten_expenses(), &filters, today()).unwrap()), vec!["Seguro frota"]);

        // gastos sin empresa nunca coinciden con un filtro de empresa
        let filters = ExpenseFilters {
            company: Some("Porto".to_string()),
            ..Default::default()
        };
        assert!(apply(ten_expenses(), &filters, today()).unwrap().is_empty());
    }

    #[test]
    fn test_scheduled_status_filter() {
        let filters = ExpenseFilters {
            status: Some(ExpenseStatus::Programado),
            ..Default::default()
        };
        assert_eq!(names(&apply(ten_expenses(), &filters, today()).unwrap()), vec!["Internet"]);
    }
}

//! Archivo anual de gastos
//!
//! Decide qué gastos se copian a `expenses_archive` para un año dado.

use chrono::Datelike;
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::expense::Expense;

#[derive(Debug, Default)]
pub struct ArchivePlan {
    pub to_copy: Vec<Expense>,
    pub skipped_duplicates: usize,
    pub skipped_other_year: usize,
}

/// Separar los gastos del año pedido que aún no están archivados
pub fn plan_archive(expenses: Vec<Expense>, year: i32, already_archived: &HashSet<Uuid>) -> ArchivePlan {
    let mut plan = ArchivePlan::default();
    for expense in expenses {
        if expense.due_date.year() != year {
            plan.skipped_other_year += 1;
        } else if already_archived.contains(&expense.id) {
            plan.skipped_duplicates += 1;
        } else {
            plan.to_copy.push(expense);
        }
    }
    plan
}

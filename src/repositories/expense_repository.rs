use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::error;
use uuid::Uuid;

use crate::models::expense::{Expense, NewExpense};
use crate::utils::errors::AppError;

pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gastos visibles, del más antiguo al más reciente. `owner = None` devuelve todos.
    pub async fn list(&self, owner: Option<Uuid>) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT * FROM expenses
            WHERE ($1::uuid IS NULL OR user_id = $1)
            ORDER BY due_date ASC, created_at ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(expenses)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Expense>, AppError> {
        let expense = sqlx::query_as::<_, Expense>("SELECT * FROM expenses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(expense)
    }

    async fn insert(tx: &mut Transaction<'_, Postgres>, expense: &NewExpense) -> Result<Expense, sqlx::Error> {
        sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (
                id, user_id, name, amount, category, subcategory, company, payment_method,
                due_date, payment_date, recurring, reference_month, recurrence_group_id,
                installment_number, installment_total, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(expense.user_id)
        .bind(&expense.name)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(&expense.subcategory)
        .bind(&expense.company)
        .bind(&expense.payment_method)
        .bind(expense.due_date)
        .bind(expense.payment_date)
        .bind(expense.recurring)
        .bind(&expense.reference_month)
        .bind(expense.recurrence_group_id)
        .bind(expense.installment_number)
        .bind(expense.installment_total)
        .bind(&expense.notes)
        .fetch_one(&mut **tx)
        .await
    }

    /// Insertar todos los gastos en una sola transacción
    pub async fn create_many(&self, expenses: &[NewExpense]) -> Result<Vec<Expense>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(expenses.len());

        for expense in expenses {
            match Self::insert(&mut tx, expense).await {
                Ok(row) => created.push(row),
                // el drop de `tx` revierte lo insertado
                Err(e) => return Err(installment_failure(&expense.name, &e)),
            }
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, expense: &NewExpense) -> Result<Expense, AppError> {
        let updated = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET name = $2, amount = $3, category = $4, subcategory = $5, company = $6,
                payment_method = $7, due_date = $8, payment_date = $9, reference_month = $10,
                notes = $11, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&expense.name)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(&expense.subcategory)
        .bind(&expense.company)
        .bind(&expense.payment_method)
        .bind(expense.due_date)
        .bind(expense.payment_date)
        .bind(&expense.reference_month)
        .bind(&expense.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn set_payment_date(&self, id: Uuid, payment_date: Option<NaiveDate>) -> Result<Expense, AppError> {
        let updated = sqlx::query_as::<_, Expense>(
            "UPDATE expenses SET payment_date = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(payment_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Borrar todas las cuotas de un grupo de recurrencia
    pub async fn delete_group(&self, group_id: Uuid, owner: Option<Uuid>) -> Result<u64, AppError> {
        let result = sqlx::query(
            "DELETE FROM expenses WHERE recurrence_group_id = $1 AND ($2::uuid IS NULL OR user_id = $2)",
        )
        .bind(group_id)
        .bind(owner)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn archived_ids(&self, year: i32) -> Result<Vec<Uuid>, AppError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM expenses_archive WHERE archived_year = $1")
            .bind(year)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Copiar gastos a `expenses_archive`; devuelve las filas realmente insertadas
    pub async fn archive(&self, expenses: &[Expense], year: i32) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for e in expenses {
            let result = sqlx::query(
                r#"
                INSERT INTO expenses_archive (
                    id, archived_year, user_id, name, amount, category, subcategory, company,
                    payment_method, due_date, payment_date, recurring, reference_month,
                    recurrence_group_id, installment_number, installment_total, notes,
                    created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(e.id)
            .bind(year)
            .bind(e.user_id)
            .bind(&e.name)
            .bind(e.amount)
            .bind(&e.category)
            .bind(&e.subcategory)
            .bind(&e.company)
            .bind(&e.payment_method)
            .bind(e.due_date)
            .bind(e.payment_date)
            .bind(e.recurring)
            .bind(&e.reference_month)
            .bind(e.recurrence_group_id)
            .bind(e.installment_number)
            .bind(e.installment_total)
            .bind(&e.notes)
            .bind(e.created_at)
            .bind(e.updated_at)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }
}

/// El detalle de sqlx va al log, nunca a la respuesta
fn installment_failure(name: &str, err: &sqlx::Error) -> AppError {
    error!("❌ Fallo al insertar la cuota '{}': {}", name, err);
    AppError::Internal("No installment was saved".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installment_failure_hides_driver_error() {
        let err = sqlx::Error::Protocol("relation \"expenses\" does not exist".to_string());
        let app_error = installment_failure("Seguro (2/12)", &err);
        let message = app_error.to_string();
        assert!(message.contains("No installment was saved"));
        assert!(!message.contains("expenses"));
        assert!(!message.contains("Seguro"));
    }
}

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::quote::{Quote, QuoteStatus};
use crate::utils::errors::AppError;

pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, quote: &Quote) -> Result<Quote, AppError> {
        let created = sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO quotes (
                id, customer_name, customer_email, customer_phone, service_type, vehicle_type,
                passengers, trip_date, trip_time, origin, destination, notes, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(quote.id)
        .bind(&quote.customer_name)
        .bind(&quote.customer_email)
        .bind(&quote.customer_phone)
        .bind(&quote.service_type)
        .bind(&quote.vehicle_type)
        .bind(quote.passengers)
        .bind(quote.trip_date)
        .bind(quote.trip_time)
        .bind(&quote.origin)
        .bind(&quote.destination)
        .bind(&quote.notes)
        .bind(quote.status.as_str())
        .bind(quote.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>("SELECT * FROM quotes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(quote)
    }

    pub async fn list(&self, status: Option<QuoteStatus>) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>(
            r#"
            SELECT * FROM quotes
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;
        Ok(quotes)
    }

    pub async fn update(&self, quote: &Quote) -> Result<Quote, AppError> {
        let updated = sqlx::query_as::<_, Quote>(
            r#"
            UPDATE quotes
            SET customer_name = $2, customer_email = $3, customer_phone = $4, service_type = $5,
                vehicle_type = $6, passengers = $7, trip_date = $8, trip_time = $9, origin = $10,
                destination = $11, notes = $12, status = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(quote.id)
        .bind(&quote.customer_name)
        .bind(&quote.customer_email)
        .bind(&quote.customer_phone)
        .bind(&quote.service_type)
        .bind(&quote.vehicle_type)
        .bind(quote.passengers)
        .bind(quote.trip_date)
        .bind(quote.trip_time)
        .bind(&quote.origin)
        .bind(&quote.destination)
        .bind(&quote.notes)
        .bind(quote.status.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn set_status(&self, id: Uuid, status: QuoteStatus) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>("UPDATE quotes SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(quote)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_status(&self, status: QuoteStatus) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quotes WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

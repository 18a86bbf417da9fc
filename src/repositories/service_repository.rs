use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::service_dto::ServiceFilters;
use crate::models::service::{Service, ServiceStatus};
use crate::utils::errors::AppError;
use crate::utils::validation::clean_optional;

pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, service: &Service) -> Result<Service, AppError> {
        let created = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (
                id, company, start_date, end_date, vehicle_id, passengers, origin, destination,
                final_value, status, invoiced, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(service.id)
        .bind(&service.company)
        .bind(service.start_date)
        .bind(service.end_date)
        .bind(service.vehicle_id)
        .bind(service.passengers)
        .bind(&service.origin)
        .bind(&service.destination)
        .bind(service.final_value)
        .bind(service.status.as_str())
        .bind(service.invoiced)
        .bind(&service.notes)
        .bind(service.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(service)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(services)
    }

    /// Listado filtrado; `from`/`to` seleccionan servicios que se solapan con el rango
    pub async fn list(&self, filters: &ServiceFilters) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT * FROM services
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR LOWER(TRIM(company)) = LOWER($2))
              AND ($3::date IS NULL OR end_date >= $3)
              AND ($4::date IS NULL OR start_date <= $4)
              AND ($5::bool IS NULL OR invoiced = $5)
            ORDER BY start_date ASC, created_at ASC
            "#,
        )
        .bind(filters.status.map(|s| s.as_str()))
        .bind(clean_optional(filters.company.clone()))
        .bind(filters.from)
        .bind(filters.to)
        .bind(filters.invoiced)
        .fetch_all(&self.pool)
        .await?;
        Ok(services)
    }

    /// `invoiced` solo lo cambia `mark_invoiced`
    pub async fn update(&self, service: &Service) -> Result<Service, AppError> {
        let updated = sqlx::query_as::<_, Service>(
            r#"
            UPDATE services
            SET company = $2, start_date = $3, end_date = $4, vehicle_id = $5, passengers = $6,
                origin = $7, destination = $8, final_value = $9, status = $10, notes = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(service.id)
        .bind(&service.company)
        .bind(service.start_date)
        .bind(service.end_date)
        .bind(service.vehicle_id)
        .bind(service.passengers)
        .bind(&service.origin)
        .bind(&service.destination)
        .bind(service.final_value)
        .bind(service.status.as_str())
        .bind(&service.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Marcar los servicios como faturados; falla entero si alguno ya lo estaba
    pub async fn mark_invoiced(&self, ids: &[Uuid]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE services SET invoiced = TRUE WHERE id = ANY($1) AND invoiced = FALSE")
            .bind(ids)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() != ids.len() as u64 {
            tx.rollback().await?;
            return Err(AppError::Conflict(
                "Some services were invoiced by another request".to_string(),
            ));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Servicios no cancelados que empiezan dentro del rango
    pub async fn count_starting_between(&self, from: NaiveDate, to: NaiveDate) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM services WHERE start_date BETWEEN $1 AND $2 AND status <> $3",
        )
        .bind(from)
        .bind(to)
        .bind(ServiceStatus::Cancelado.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

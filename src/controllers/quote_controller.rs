use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::quote_dto::{CreateQuoteRequest, QuoteFilters, UpdateQuoteRequest, UpdateQuoteStatusRequest};
use crate::dto::{patch, ApiResponse};
use crate::models::quote::{Quote, QuoteStatus};
use crate::repositories::quote_repository::QuoteRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::clean_optional;

pub struct QuoteController {
    repository: QuoteRepository,
}

impl QuoteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: QuoteRepository::new(pool),
        }
    }

    async fn existing(&self, id: Uuid) -> Result<Quote, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Quote", &id.to_string()))
    }

    /// Pedido público de orçamento
    pub async fn create(&self, request: CreateQuoteRequest) -> Result<ApiResponse<Quote>, AppError> {
        request.validate()?;

        let quote = Quote {
            id: Uuid::new_v4(),
            customer_name: request.customer_name.trim().to_string(),
            customer_email: clean_optional(request.customer_email),
            customer_phone: request.customer_phone.trim().to_string(),
            service_type: request.service_type.trim().to_string(),
            vehicle_type: clean_optional(request.vehicle_type),
            passengers: request.passengers,
            trip_date: request.trip_date,
            trip_time: request.trip_time,
            origin: request.origin.trim().to_string(),
            destination: request.destination.trim().to_string(),
            notes: clean_optional(request.notes),
            status: QuoteStatus::Pendente,
            created_at: Utc::now(),
        };

        let created = self.repository.create(&quote).await?;
        info!("📝 Nuevo orçamento de {} para {}", created.customer_name, created.trip_date);
        Ok(ApiResponse::success_with_message(created, "Orçamento recibido"))
    }

    pub async fn list(&self, filters: &QuoteFilters) -> Result<ApiResponse<Vec<Quote>>, AppError> {
        let quotes = self.repository.list(filters.status).await?;
        Ok(ApiResponse::success(quotes))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<Quote>, AppError> {
        Ok(ApiResponse::success(self.existing(id).await?))
    }

    pub async fn update(&self, id: Uuid, request: UpdateQuoteRequest) -> Result<ApiResponse<Quote>, AppError> {
        request.validate()?;
        let current = self.existing(id).await?;

        let merged = Quote {
            customer_name: request.customer_name.map(|v| v.trim().to_string()).unwrap_or(current.customer_name),
            customer_email: clean_optional(patch(current.customer_email, request.customer_email)),
            customer_phone: request.customer_phone.unwrap_or(current.customer_phone),
            service_type: request.service_type.unwrap_or(current.service_type),
            vehicle_type: clean_optional(patch(current.vehicle_type, request.vehicle_type)),
            passengers: request.passengers.unwrap_or(current.passengers),
            trip_date: request.trip_date.unwrap_or(current.trip_date),
            trip_time: patch(current.trip_time, request.trip_time),
            origin: request.origin.unwrap_or(current.origin),
            destination: request.destination.unwrap_or(current.destination),
            notes: clean_optional(patch(current.notes, request.notes)),
            status: request.status.unwrap_or(current.status),
            ..current
        };

        let updated = self.repository.update(&merged).await?;
        Ok(ApiResponse::success_with_message(updated, "Orçamento actualizado"))
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        request: UpdateQuoteStatusRequest,
    ) -> Result<ApiResponse<Quote>, AppError> {
        let quote = self
            .repository
            .set_status(id, request.status)
            .await?
            .ok_or_else(|| not_found_error("Quote", &id.to_string()))?;
        info!("📋 Orçamento {} → {}", id, quote.status.as_str());
        Ok(ApiResponse::success(quote))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Quote", &id.to_string()));
        }
        Ok(ApiResponse::message("Orçamento eliminado"))
    }
}

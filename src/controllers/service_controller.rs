use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::service_dto::{CreateServiceRequest, ServiceFilters, UpdateServiceRequest};
use crate::dto::{patch, ApiResponse};
use crate::models::service::Service;
use crate::repositories::service_repository::ServiceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError};
use crate::utils::validation::clean_optional;

pub struct ServiceController {
    repository: ServiceRepository,
    vehicles: VehicleRepository,
}

impl ServiceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ServiceRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    async fn existing(&self, id: Uuid) -> Result<Service, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Service", &id.to_string()))
    }

    async fn ensure_vehicle(&self, vehicle_id: Option<Uuid>) -> Result<(), AppError> {
        if let Some(vehicle_id) = vehicle_id {
            if self.vehicles.find_by_id(vehicle_id).await?.is_none() {
                return Err(not_found_error("Vehicle", &vehicle_id.to_string()));
            }
        }
        Ok(())
    }

    pub async fn create(&self, request: CreateServiceRequest) -> Result<ApiResponse<Service>, AppError> {
        request.validate()?;
        self.ensure_vehicle(request.vehicle_id).await?;

        let service = Service {
            id: Uuid::new_v4(),
            company: request.company.trim().to_string(),
            start_date: request.start_date,
            end_date: request.end_date,
            vehicle_id: request.vehicle_id,
            passengers: request.passengers,
            origin: request.origin.trim().to_string(),
            destination: request.destination.trim().to_string(),
            final_value: request.final_value,
            status: request.status,
            invoiced: false,
            notes: clean_optional(request.notes),
            created_at: Utc::now(),
        };

        let created = self.repository.create(&service).await?;
        info!("🗓️ Servicio para {} agendado ({} → {})", created.company, created.start_date, created.end_date);
        Ok(ApiResponse::success_with_message(created, "Servicio creado exitosamente"))
    }

    pub async fn list(&self, filters: &ServiceFilters) -> Result<ApiResponse<Vec<Service>>, AppError> {
        Ok(ApiResponse::success(self.repository.list(filters).await?))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<Service>, AppError> {
        Ok(ApiResponse::success(self.existing(id).await?))
    }

    pub async fn update(&self, id: Uuid, request: UpdateServiceRequest) -> Result<ApiResponse<Service>, AppError> {
        request.validate()?;
        let current = self.existing(id).await?;

        let vehicle_id = patch(current.vehicle_id, request.vehicle_id);
        if vehicle_id != current.vehicle_id {
            self.ensure_vehicle(vehicle_id).await?;
        }

        let merged = merge_update(current, request, vehicle_id);

        if merged.end_date < merged.start_date {
            return Err(validation_error("end_date", "end_date must not be before start_date"));
        }

        let updated = self.repository.update(&merged).await?;
        Ok(ApiResponse::success_with_message(updated, "Servicio actualizado"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Service", &id.to_string()));
        }
        Ok(ApiResponse::message("Servicio eliminado"))
    }
}

/// Aplicar un update parcial; `invoiced` nunca cambia por aquí
fn merge_update(current: Service, request: UpdateServiceRequest, vehicle_id: Option<Uuid>) -> Service {
    Service {
        company: request.company.map(|v| v.trim().to_string()).unwrap_or(current.company),
        start_date: request.start_date.unwrap_or(current.start_date),
        end_date: request.end_date.unwrap_or(current.end_date),
        vehicle_id,
        passengers: request.passengers.unwrap_or(current.passengers),
        origin: request.origin.unwrap_or(current.origin),
        destination: request.destination.unwrap_or(current.destination),
        final_value: request.final_value.unwrap_or(current.final_value),
        status: request.status.unwrap_or(current.status),
        notes: clean_optional(patch(current.notes, request.notes)),
        ..current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::service::ServiceStatus;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn invoiced_service() -> Service {
        let day = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        Service {
            id: Uuid::new_v4(),
            company: "Escola ABC".to_string(),
            start_date: day,
            end_date: day,
            vehicle_id: None,
            passengers: 40,
            origin: "São Paulo".to_string(),
            destination: "Holambra".to_string(),
            final_value: Decimal::new(280000, 2),
            status: ServiceStatus::Concluido,
            invoiced: true,
            notes: Some("ida e volta".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_update_cannot_reset_invoiced_flag() {
        let request: UpdateServiceRequest =
            serde_json::from_value(json!({ "invoiced": false, "passengers": 38 })).unwrap();
        let merged = merge_update(invoiced_service(), request, None);
        assert!(merged.invoiced);
        assert_eq!(merged.passengers, 38);
    }

    #[test]
    fn test_update_keeps_absent_fields_and_clears_null_notes() {
        let current = invoiced_service();
        let request: UpdateServiceRequest = serde_json::from_value(json!({ "notes": null })).unwrap();
        let merged = merge_update(current.clone(), request, current.vehicle_id);
        assert_eq!(merged.company, current.company);
        assert_eq!(merged.final_value, current.final_value);
        assert_eq!(merged.notes, None);
    }
}

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::dto::{patch, ApiResponse};
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError};
use crate::utils::validation::{clean_optional, normalize_plate};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    async fn existing(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        let plate = normalize_plate(&request.plate);
        // Verificar que la matrícula no exista
        if self.repository.plate_exists(&plate, None).await? {
            return Err(conflict_error("Vehicle", "plate", &plate));
        }

        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            plate,
            vehicle_type: request.vehicle_type.trim().to_string(),
            color: clean_optional(request.color),
            capacity: request.capacity,
            registration_number: clean_optional(request.registration_number),
            antt_license: request.antt_license,
            antt_expiry: request.antt_expiry,
            der_license: request.der_license,
            der_expiry: request.der_expiry,
            municipal_license: request.municipal_license,
            municipal_expiry: request.municipal_expiry,
            notes: clean_optional(request.notes),
            created_at: Utc::now(),
        };

        let created = self.repository.create(&vehicle).await?;
        info!("🚌 Vehículo {} registrado", created.plate);
        Ok(ApiResponse::success_with_message(created, "Vehículo creado exitosamente"))
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Vehicle>>, AppError> {
        Ok(ApiResponse::success(self.repository.list().await?))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<Vehicle>, AppError> {
        Ok(ApiResponse::success(self.existing(id).await?))
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;
        let current = self.existing(id).await?;

        let plate = match request.plate {
            Some(plate) => {
                let plate = normalize_plate(&plate);
                if plate != current.plate && self.repository.plate_exists(&plate, Some(id)).await? {
                    return Err(conflict_error("Vehicle", "plate", &plate));
                }
                plate
            }
            None => current.plate.clone(),
        };

        let merged = Vehicle {
            plate,
            vehicle_type: request.vehicle_type.map(|v| v.trim().to_string()).unwrap_or(current.vehicle_type),
            color: clean_optional(patch(current.color, request.color)),
            capacity: request.capacity.unwrap_or(current.capacity),
            registration_number: clean_optional(patch(current.registration_number, request.registration_number)),
            antt_license: request.antt_license.unwrap_or(current.antt_license),
            antt_expiry: patch(current.antt_expiry, request.antt_expiry),
            der_license: request.der_license.unwrap_or(current.der_license),
            der_expiry: patch(current.der_expiry, request.der_expiry),
            municipal_license: request.municipal_license.unwrap_or(current.municipal_license),
            municipal_expiry: patch(current.municipal_expiry, request.municipal_expiry),
            notes: clean_optional(patch(current.notes, request.notes)),
            ..current
        };

        let updated = self.repository.update(&merged).await?;
        Ok(ApiResponse::success_with_message(updated, "Vehículo actualizado"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }
        info!("🗑️ Vehículo {} eliminado", id);
        Ok(ApiResponse::message("Vehículo eliminado"))
    }
}

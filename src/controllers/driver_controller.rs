use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverRequest};
use crate::dto::{patch, ApiResponse};
use crate::models::driver::Driver;
use crate::repositories::driver_repository::DriverRepository;
use crate::services::photo_storage::{content_type_for, PhotoStore};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::clean_optional;

/// Foto lista para devolver al cliente
pub struct DriverPhoto {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct DriverController {
    repository: DriverRepository,
    photos: Arc<dyn PhotoStore>,
}

impl DriverController {
    pub fn new(pool: PgPool, photos: Arc<dyn PhotoStore>) -> Self {
        Self {
            repository: DriverRepository::new(pool),
            photos,
        }
    }

    async fn existing(&self, id: Uuid) -> Result<Driver, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", &id.to_string()))
    }

    pub async fn create(&self, request: CreateDriverRequest) -> Result<ApiResponse<Driver>, AppError> {
        request.validate()?;

        let driver = Driver {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            phone: request.phone.trim().to_string(),
            company: clean_optional(request.company),
            license_number: clean_optional(request.license_number),
            license_expiry: request.license_expiry,
            course_expiry: request.course_expiry,
            bank_name: clean_optional(request.bank_name),
            bank_agency: clean_optional(request.bank_agency),
            bank_account: clean_optional(request.bank_account),
            pix_key: clean_optional(request.pix_key),
            photo_path: None,
            created_at: Utc::now(),
        };

        let created = self.repository.create(&driver).await?;
        info!("🧑‍✈️ Motorista {} registrado", created.name);
        Ok(ApiResponse::success_with_message(created, "Motorista creado exitosamente"))
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Driver>>, AppError> {
        Ok(ApiResponse::success(self.repository.list().await?))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<Driver>, AppError> {
        Ok(ApiResponse::success(self.existing(id).await?))
    }

    pub async fn update(&self, id: Uuid, request: UpdateDriverRequest) -> Result<ApiResponse<Driver>, AppError> {
        request.validate()?;
        let current = self.existing(id).await?;

        let merged = Driver {
            name: request.name.map(|v| v.trim().to_string()).unwrap_or(current.name),
            phone: request.phone.map(|v| v.trim().to_string()).unwrap_or(current.phone),
            company: clean_optional(patch(current.company, request.company)),
            license_number: clean_optional(patch(current.license_number, request.license_number)),
            license_expiry: patch(current.license_expiry, request.license_expiry),
            course_expiry: patch(current.course_expiry, request.course_expiry),
            bank_name: clean_optional(patch(current.bank_name, request.bank_name)),
            bank_agency: clean_optional(patch(current.bank_agency, request.bank_agency)),
            bank_account: clean_optional(patch(current.bank_account, request.bank_account)),
            pix_key: clean_optional(patch(current.pix_key, request.pix_key)),
            ..current
        };

        let updated = self.repository.update(&merged).await?;
        Ok(ApiResponse::success_with_message(updated, "Motorista actualizado"))
    }

    /// Guardar la foto y registrar su clave
    pub async fn upload_photo(
        &self,
        id: Uuid,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<ApiResponse<Driver>, AppError> {
        let current = self.existing(id).await?;
        let key = self.photos.save(id, content_type, bytes).await?;

        // una foto anterior con otra extensión quedaría huérfana
        if let Some(old) = current.photo_path.filter(|old| *old != key) {
            if let Err(e) = self.photos.delete(&old).await {
                warn!("⚠️ No se pudo borrar la foto anterior {}: {}", old, e);
            }
        }

        let updated = self.repository.set_photo_path(id, Some(&key)).await?;
        info!("📸 Foto del motorista {} actualizada ({} bytes)", id, bytes.len());
        Ok(ApiResponse::success_with_message(updated, "Foto actualizada"))
    }

    pub async fn photo(&self, id: Uuid) -> Result<DriverPhoto, AppError> {
        let driver = self.existing(id).await?;
        let key = driver
            .photo_path
            .ok_or_else(|| AppError::NotFound(format!("Driver '{}' has no photo", id)))?;
        let bytes = self.photos.load(&key).await?;
        Ok(DriverPhoto {
            content_type: content_type_for(&key),
            bytes,
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let driver = self.existing(id).await?;
        self.repository.delete(id).await?;

        if let Some(key) = driver.photo_path {
            if let Err(e) = self.photos.delete(&key).await {
                warn!("⚠️ Motorista {} eliminado pero su foto no: {}", id, e);
            }
        }

        info!("🗑️ Motorista {} eliminado", id);
        Ok(ApiResponse::message("Motorista eliminado"))
    }
}

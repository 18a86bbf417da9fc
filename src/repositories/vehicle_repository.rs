use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::{map_unique_violation, AppError};

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, plate, vehicle_type, color, capacity, registration_number,
                antt_license, antt_expiry, der_license, der_expiry,
                municipal_license, municipal_expiry, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.plate)
        .bind(&vehicle.vehicle_type)
        .bind(&vehicle.color)
        .bind(vehicle.capacity)
        .bind(&vehicle.registration_number)
        .bind(vehicle.antt_license)
        .bind(vehicle.antt_expiry)
        .bind(vehicle.der_license)
        .bind(vehicle.der_expiry)
        .bind(vehicle.municipal_license)
        .bind(vehicle.municipal_expiry)
        .bind(&vehicle.notes)
        .bind(vehicle.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Vehicle", "plate", &vehicle.plate))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vehicle)
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY plate ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(vehicles)
    }

    pub async fn plate_exists(&self, plate: &str, except: Option<Uuid>) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(plate)
        .bind(except)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET plate = $2, vehicle_type = $3, color = $4, capacity = $5, registration_number = $6,
                antt_license = $7, antt_expiry = $8, der_license = $9, der_expiry = $10,
                municipal_license = $11, municipal_expiry = $12, notes = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.plate)
        .bind(&vehicle.vehicle_type)
        .bind(&vehicle.color)
        .bind(vehicle.capacity)
        .bind(&vehicle.registration_number)
        .bind(vehicle.antt_license)
        .bind(vehicle.antt_expiry)
        .bind(vehicle.der_license)
        .bind(vehicle.der_expiry)
        .bind(vehicle.municipal_license)
        .bind(vehicle.municipal_expiry)
        .bind(&vehicle.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Vehicle", "plate", &vehicle.plate))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

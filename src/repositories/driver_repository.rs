use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::utils::errors::AppError;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, driver: &Driver) -> Result<Driver, AppError> {
        let created = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (
                id, name, phone, company, license_number, license_expiry, course_expiry,
                bank_name, bank_agency, bank_account, pix_key, photo_path, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.name)
        .bind(&driver.phone)
        .bind(&driver.company)
        .bind(&driver.license_number)
        .bind(driver.license_expiry)
        .bind(driver.course_expiry)
        .bind(&driver.bank_name)
        .bind(&driver.bank_agency)
        .bind(&driver.bank_account)
        .bind(&driver.pix_key)
        .bind(&driver.photo_path)
        .bind(driver.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(driver)
    }

    pub async fn list(&self) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(drivers)
    }

    pub async fn update(&self, driver: &Driver) -> Result<Driver, AppError> {
        let updated = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET name = $2, phone = $3, company = $4, license_number = $5, license_expiry = $6,
                course_expiry = $7, bank_name = $8, bank_agency = $9, bank_account = $10, pix_key = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.name)
        .bind(&driver.phone)
        .bind(&driver.company)
        .bind(&driver.license_number)
        .bind(driver.license_expiry)
        .bind(driver.course_expiry)
        .bind(&driver.bank_name)
        .bind(&driver.bank_agency)
        .bind(&driver.bank_account)
        .bind(&driver.pix_key)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn set_photo_path(&self, id: Uuid, photo_path: Option<&str>) -> Result<Driver, AppError> {
        let updated = sqlx::query_as::<_, Driver>("UPDATE drivers SET photo_path = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(photo_path)
            .fetch_one(&self.pool)
            .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

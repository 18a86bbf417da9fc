//! Estado compartido de la aplicación
//!
//! Dependencias inyectadas explícitamente en el router de Axum.

use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::user_repository::{UserDirectory, UserRepository};
use crate::services::photo_storage::{LocalPhotoStore, PhotoStore};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<EnvironmentConfig>,
    pub jwt: JwtConfig,
    pub photos: Arc<dyn PhotoStore>,
    pub users: Arc<dyn UserDirectory>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let photos: Arc<dyn PhotoStore> = Arc::new(LocalPhotoStore::new(config.storage_dir.clone()));
        Self::with_photo_store(pool, config, photos)
    }

    pub fn with_photo_store(pool: PgPool, config: EnvironmentConfig, photos: Arc<dyn PhotoStore>) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            pool,
            jwt: JwtConfig::from(&config),
            config: Arc::new(config),
            photos,
        }
    }

    /// Reemplazar la consulta de usuarios activos
    pub fn with_user_directory(mut self, users: Arc<dyn UserDirectory>) -> Self {
        self.users = users;
        self
    }

    /// "Hoy" en la zona horaria del negocio
    pub fn today(&self) -> NaiveDate {
        self.config.today()
    }
}

//! Almacenamiento de fotos de motoristas
//!
//! `PhotoStore` es la costura inyectada en `AppState`; la implementación
//! local guarda los archivos bajo `STORAGE_DIR`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

/// Tamaño máximo aceptado para una foto
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Extensión asociada a cada content type soportado
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type.split(';').next().map(str::trim) {
        Some("image/jpeg") => Some("jpg"),
        Some("image/png") => Some("png"),
        Some("image/webp") => Some("webp"),
        _ => None,
    }
}

/// Content type a partir de la clave guardada
pub fn content_type_for(key: &str) -> &'static str {
    match Path::new(key).extension().and_then(|e| e.to_str()) {
        Some("jpg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Guardar la foto del motorista y devolver su clave
    async fn save(&self, driver_id: Uuid, content_type: &str, bytes: &[u8]) -> AppResult<String>;
    async fn load(&self, key: &str) -> AppResult<Vec<u8>>;
    async fn delete(&self, key: &str) -> AppResult<()>;
}

/// Fotos en el sistema de archivos local
#[derive(Debug, Clone)]
pub struct LocalPhotoStore {
    root: PathBuf,
}

impl LocalPhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        // las claves las genera `save`; cualquier otra cosa se rechaza
        let valid = key.starts_with("drivers/")
            && !key.contains("..")
            && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '.'));
        if !valid {
            return Err(AppError::BadRequest(format!("Invalid photo key '{}'", key)));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl PhotoStore for LocalPhotoStore {
    async fn save(&self, driver_id: Uuid, content_type: &str, bytes: &[u8]) -> AppResult<String> {
        let extension = extension_for(content_type)
            .ok_or_else(|| AppError::BadRequest(format!("Unsupported image type '{}'", content_type)))?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Empty photo".to_string()));
        }
        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(AppError::PayloadTooLarge("Photo larger than 5 MiB".to_string()));
        }

        let key = format!("drivers/{}.{}", driver_id, extension);
        let path = self.path_for(&key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("Error creating {}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Storage(format!("Error writing {}: {}", path.display(), e)))?;

        debug!("📸 Foto guardada en {}", path.display());
        Ok(key)
    }

    async fn load(&self, key: &str) -> AppResult<Vec<u8>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("Photo '{}' not found", key)))
            }
            Err(e) => Err(AppError::Storage(format!("Error reading {}: {}", path.display(), e))),
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!("Error deleting {}: {}", path.display(), e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> LocalPhotoStore {
        LocalPhotoStore::new(std::env::temp_dir().join(format!("photo-store-{}", Uuid::new_v4())))
    }

    #[tokio::test]
    async fn test_save_load_delete() {
        let store = temp_store();
        let driver_id = Uuid::new_v4();

        let key = store.save(driver_id, "image/png", b"\x89PNG fake").await.unwrap();
        assert_eq!(key, format!("drivers/{}.png", driver_id));
        assert_eq!(store.load(&key).await.unwrap(), b"\x89PNG fake".to_vec());

        store.delete(&key).await.unwrap();
        assert!(matches!(store.load(&key).await, Err(AppError::NotFound(_))));
        // borrar dos veces no falla
        store.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_bad_input() {
        let store = temp_store();
        let id = Uuid::new_v4();
        assert!(matches!(store.save(id, "text/plain", b"x").await, Err(AppError::BadRequest(_))));
        assert!(matches!(store.save(id, "image/jpeg", b"").await, Err(AppError::BadRequest(_))));
        let big = vec![0u8; MAX_PHOTO_BYTES + 1];
        assert!(matches!(store.save(id, "image/jpeg", &big).await, Err(AppError::PayloadTooLarge(_))));
        assert!(matches!(store.load("../etc/passwd").await, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(extension_for("image/jpeg; charset=binary"), Some("jpg"));
        assert_eq!(content_type_for("drivers/x.webp"), "image/webp");
        assert_eq!(content_type_for("drivers/x"), "application/octet-stream");
    }
}

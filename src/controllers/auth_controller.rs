use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{CreateUserRequest, LoginRequest, LoginResponse, UserResponse};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::user::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{forbidden_error, not_found_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    repository: UserRepository,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<ApiResponse<LoginResponse>, AppError> {
        request.validate()?;

        let invalid = || AppError::Unauthorized("Email o contraseña incorrectos".to_string());
        let user = self
            .repository
            .find_by_email(request.email.trim())
            .await?
            .ok_or_else(invalid)?;

        let matches = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !matches {
            warn!("🔒 Login fallido para {}", user.email);
            return Err(invalid());
        }

        let token = generate_token(user.id, user.role, &self.jwt)?;
        info!("🔑 Login de {} ({})", user.email, user.role.as_str());

        Ok(ApiResponse::success(LoginResponse {
            token,
            expires_in: self.jwt.expiration,
            user: user.into(),
        }))
    }

    pub async fn me(&self, actor: &AuthenticatedUser) -> Result<ApiResponse<UserResponse>, AppError> {
        let user = self
            .repository
            .find_by_id(actor.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;
        Ok(ApiResponse::success(user.into()))
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        let password_hash = hash(&request.password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))?;
        let role = request.role.unwrap_or(UserRole::Staff);

        let user = self
            .repository
            .create(&email, request.full_name.trim(), &password_hash, role)
            .await?;
        info!("👤 Usuario creado: {} ({})", user.email, role.as_str());

        Ok(ApiResponse::success_with_message(user.into(), "Usuario creado exitosamente"))
    }

    pub async fn list_users(&self) -> Result<ApiResponse<Vec<UserResponse>>, AppError> {
        let users = self.repository.list().await?;
        Ok(ApiResponse::success(users.into_iter().map(UserResponse::from).collect()))
    }

    pub async fn delete_user(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if actor.user_id == id {
            return Err(forbidden_error("delete user", "you cannot delete yourself"));
        }
        if !self.repository.deactivate(id).await? {
            return Err(not_found_error("User", &id.to_string()));
        }
        info!("🗑️ Usuario {} dado de baja", id);
        Ok(ApiResponse::message("Usuario eliminado"))
    }
}

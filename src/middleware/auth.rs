//! Middleware de autenticación JWT
//!
//! Valida el bearer token, comprueba que el usuario siga activo e inyecta
//! `AuthenticatedUser` en las extensions de la request. Las rutas de
//! administración apilan `admin_only_middleware`.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    models::user::UserRole,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Filtro de propietario: los admin ven todo, el staff solo lo suyo
    pub fn owner_scope(&self) -> Option<Uuid> {
        if self.is_admin() {
            None
        } else {
            Some(self.user_id)
        }
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    // el rol vale lo que diga la base, no el token
    let user = state
        .users
        .find_active(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado o dado de baja".to_string()))?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        role: user.role,
    });

    Ok(next.run(request).await)
}

/// Middleware que exige rol admin; debe ir después de `auth_middleware`
pub async fn admin_only_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized("Autenticación requerida".to_string()))?;

    if !user.is_admin() {
        return Err(AppError::Forbidden("Solo administradores".to_string()));
    }

    Ok(next.run(request).await)
}

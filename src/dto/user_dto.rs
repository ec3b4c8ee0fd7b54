//! DTOs de gestión de usuarios

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::user::UserRole;

/// Request de alta de usuario (solo admin)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,

    #[validate(length(min = 1, max = 100))]
    pub password: String,

    pub role: Option<UserRole>,
}

/// Request de auto-registro
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,

    #[validate(length(min = 1, max = 100))]
    pub password: String,
}

/// Request de actualización de usuario (solo admin).
/// El rol siempre se reescribe; la contraseña solo si viene informada.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub role: UserRole,
    pub password: Option<String>,
}

/// Response de usuario para listados de administración
#[derive(Debug, Serialize, FromRow)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub role: String,
}

/// Response reducida para shareable/search
#[derive(Debug, Serialize, FromRow)]
pub struct UserSummaryResponse {
    pub id: i64,
    pub username: String,
}

/// Query string de búsqueda de usuarios
#[derive(Debug, Deserialize)]
pub struct UserSearchQuery {
    pub q: Option<String>,
}

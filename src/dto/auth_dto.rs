//! DTOs de autenticación

use serde::{Deserialize, Serialize};

use crate::models::user::UserRole;

/// Request de login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response de login - el token JWT sustituye a la cookie de sesión
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub role: UserRole,
    pub token: String,
}

/// Response de /users/me
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
}

//! Controller de autenticación
//! 
//! Login contra la tabla users con bcrypt y emisión de JWT.
//! Un username inexistente y una contraseña incorrecta producen la misma
//! respuesta para no filtrar qué usuarios existen.

use bcrypt::verify;
use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, MeResponse};
use crate::middleware::auth::{generate_jwt_token, AuthenticatedUser};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_not_empty;

pub struct AuthController {
    users: UserRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    pub async fn login(
        &self,
        config: &EnvironmentConfig,
        request: LoginRequest,
    ) -> AppResult<LoginResponse> {
        validate_not_empty(&request.username)
            .and_then(|_| validate_not_empty(&request.password))
            .map_err(|_| AppError::Validation("Username and password are required".to_string()))?;

        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let password_ok = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        if !password_ok {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = generate_jwt_token(&user, config)?;

        log::info!("Login correcto de '{}'", user.username);

        Ok(LoginResponse {
            success: true,
            role: user.role(),
            token,
        })
    }

    pub async fn me(&self, user: &AuthenticatedUser) -> AppResult<MeResponse> {
        let row = self
            .users
            .find_by_id(user.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(MeResponse {
            id: row.id,
            username: row.username.clone(),
            role: row.role(),
        })
    }
}

//! Controller de gestión de usuarios
//! 
//! Las operaciones de administración exigen rol admin; el auto-registro
//! y los listados de compartición están abiertos a cualquier usuario
//! autenticado.

use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

use crate::dto::user_dto::{
    CreateUserRequest, RegisterUserRequest, UpdateUserRequest, UserResponse, UserSummaryResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct UserController {
    users: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> AppResult<Vec<UserResponse>> {
        ensure_admin(user)?;
        self.users.list_all().await
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateUserRequest,
    ) -> AppResult<i64> {
        ensure_admin(user)?;
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let password_hash =
            hash(&request.password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))?;
        let role = request.role.unwrap_or(UserRole::User);

        self.users
            .create(&request.username, &password_hash, role.as_str())
            .await
    }

    /// Auto-registro: siempre con rol 'user'
    pub async fn register(&self, request: RegisterUserRequest) -> AppResult<i64> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let password_hash =
            hash(&request.password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))?;

        self.users
            .create(&request.username, &password_hash, UserRole::User.as_str())
            .await
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: i64,
        request: UpdateUserRequest,
    ) -> AppResult<()> {
        ensure_admin(user)?;

        let password_hash = match &request.password {
            Some(password) if !password.is_empty() => {
                Some(hash(password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))?)
            }
            _ => None,
        };

        let updated = self
            .users
            .update(id, request.role.as_str(), password_hash.as_deref())
            .await?;

        if updated == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: i64) -> AppResult<()> {
        ensure_admin(user)?;

        if id == user.user_id {
            return Err(AppError::Validation("Cannot delete yourself".to_string()));
        }

        let deleted = self.users.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    pub async fn list_shareable(
        &self,
        user: &AuthenticatedUser,
    ) -> AppResult<Vec<UserSummaryResponse>> {
        self.users
            .list_shareable(user.user_id, user.role.is_admin())
            .await
    }

    pub async fn search(
        &self,
        user: &AuthenticatedUser,
        query: Option<&str>,
    ) -> AppResult<Vec<UserSummaryResponse>> {
        match query {
            Some(q) if !q.is_empty() => self.users.search(q, user.user_id).await,
            _ => Ok(vec![]),
        }
    }
}

fn ensure_admin(user: &AuthenticatedUser) -> AppResult<()> {
    if !user.role.is_admin() {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }
    Ok(())
}

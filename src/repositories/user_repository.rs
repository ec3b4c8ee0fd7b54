//! Repositorio de User
//! 
//! El password_hash nunca sale de la capa de controllers; los listados
//! proyectan columnas sin credenciales.

use sqlx::PgPool;

use crate::dto::user_dto::{UserResponse, UserSummaryResponse};
use crate::models::user::User;
use crate::utils::errors::{AppError, AppResult};

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Alta de usuario. La unicidad del username la garantiza la
    /// constraint de la tabla; la violación se reporta como Conflict.
    pub async fn create(&self, username: &str, password_hash: &str, role: &str) -> AppResult<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Username already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.0)
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn list_all(&self) -> AppResult<Vec<UserResponse>> {
        let users =
            sqlx::query_as::<_, UserResponse>("SELECT id, username, role FROM users ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(users)
    }

    /// Usuarios con los que se puede compartir: todos menos uno mismo;
    /// para no-admins tampoco se listan los admins
    pub async fn list_shareable(
        &self,
        user_id: i64,
        include_admins: bool,
    ) -> AppResult<Vec<UserSummaryResponse>> {
        let sql = if include_admins {
            "SELECT id, username FROM users WHERE id != $1 ORDER BY username"
        } else {
            "SELECT id, username FROM users WHERE id != $1 AND role != 'admin' ORDER BY username"
        };

        let users = sqlx::query_as::<_, UserSummaryResponse>(sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    /// Búsqueda por username parcial; nunca devuelve admins ni a uno mismo
    pub async fn search(&self, query: &str, user_id: i64) -> AppResult<Vec<UserSummaryResponse>> {
        let pattern = format!("%{}%", query);
        let users = sqlx::query_as::<_, UserSummaryResponse>(
            r#"
            SELECT id, username FROM users
            WHERE username ILIKE $1 AND role != 'admin' AND id != $2
            LIMIT 5
            "#,
        )
        .bind(pattern)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// El rol siempre se reescribe; la contraseña solo si viene nueva
    pub async fn update(
        &self,
        id: i64,
        role: &str,
        password_hash: Option<&str>,
    ) -> AppResult<u64> {
        let result = match password_hash {
            Some(hash) => {
                sqlx::query("UPDATE users SET role = $2, password_hash = $3 WHERE id = $1")
                    .bind(id)
                    .bind(role)
                    .bind(hash)
                    .execute(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
                    .bind(id)
                    .bind(role)
                    .execute(&self.pool)
                    .await?
            }
        };

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

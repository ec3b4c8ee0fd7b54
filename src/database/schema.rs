//! Esquema y datos semilla
//! 
//! Creación idempotente de tablas al arranque. El status de los
//! vehículos no tiene columna: es siempre derivado. La tripleta de
//! vehicle_shares lleva UNIQUE para que regalar dos veces el mismo
//! acceso sea un no-op.

use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use sqlx::PgPool;

use crate::utils::errors::{AppError, AppResult};

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin789";

/// Crear las tablas si no existen y sembrar los datos iniciales
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'user',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicles (
            id BIGSERIAL PRIMARY KEY,
            owner_id BIGINT NOT NULL DEFAULT 0,
            owner_name TEXT,
            id_number TEXT,
            plate_number TEXT,
            permit_expiry_date DATE NOT NULL,
            model_year TEXT,
            vehicle_name TEXT,
            category TEXT,
            is_on_hold BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicle_shares (
            id BIGSERIAL PRIMARY KEY,
            vehicle_id BIGINT NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
            shared_by_user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            shared_to_user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            UNIQUE (vehicle_id, shared_by_user_id, shared_to_user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS share_requests (
            id BIGSERIAL PRIMARY KEY,
            vehicle_id BIGINT NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
            shared_by_user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            shared_to_user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS system_config (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    seed_defaults(pool).await?;

    Ok(())
}

/// Sembrar admin por defecto y estado de instalación (todo idempotente)
async fn seed_defaults(pool: &PgPool) -> AppResult<()> {
    let admin_hash = hash(DEFAULT_ADMIN_PASSWORD, DEFAULT_COST)
        .map_err(|e| AppError::Hash(e.to_string()))?;

    let seeded = sqlx::query(
        r#"
        INSERT INTO users (username, password_hash, role)
        VALUES ($1, $2, 'admin')
        ON CONFLICT (username) DO NOTHING
        "#,
    )
    .bind(DEFAULT_ADMIN_USERNAME)
    .bind(&admin_hash)
    .execute(pool)
    .await?;

    if seeded.rows_affected() > 0 {
        log::warn!(
            "Usuario admin por defecto creado; cambia la contraseña inicial cuanto antes"
        );
    }

    sqlx::query(
        r#"
        INSERT INTO system_config (key, value)
        VALUES ('install_date', $1)
        ON CONFLICT (key) DO NOTHING
        "#,
    )
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO system_config (key, value)
        VALUES ('is_activated', 'false')
        ON CONFLICT (key) DO NOTHING
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

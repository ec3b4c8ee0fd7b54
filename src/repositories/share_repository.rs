//! Repositorio del flujo de compartición
//! 
//! share_requests guarda las propuestas; vehicle_shares los grants
//! durables. La constraint UNIQUE sobre la tripleta hace idempotente la
//! materialización del grant.

use sqlx::PgPool;

use crate::dto::share_dto::{PendingShareResponse, SentShareResponse};
use crate::models::share::{ShareRequest, ShareRequestStatus};
use crate::utils::errors::AppResult;

pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_request(
        &self,
        vehicle_id: i64,
        shared_by_user_id: i64,
        shared_to_user_id: i64,
    ) -> AppResult<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO share_requests (vehicle_id, shared_by_user_id, shared_to_user_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, 'pending', now(), now())
            RETURNING id
            "#,
        )
        .bind(vehicle_id)
        .bind(shared_by_user_id)
        .bind(shared_to_user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Busca una solicitud SOLO si está dirigida al destinatario dado.
    /// Para cualquier otro usuario la solicitud no existe.
    pub async fn find_for_recipient(
        &self,
        request_id: i64,
        shared_to_user_id: i64,
    ) -> AppResult<Option<ShareRequest>> {
        let request = sqlx::query_as::<_, ShareRequest>(
            "SELECT * FROM share_requests WHERE id = $1 AND shared_to_user_id = $2",
        )
        .bind(request_id)
        .bind(shared_to_user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn set_status(&self, request_id: i64, status: ShareRequestStatus) -> AppResult<()> {
        sqlx::query("UPDATE share_requests SET status = $2, updated_at = now() WHERE id = $1")
            .bind(request_id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Transición a accepted más materialización del grant, ambas en la
    /// misma transacción. El ON CONFLICT hace el grant idempotente.
    pub async fn accept(&self, request: &ShareRequest) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE share_requests SET status = 'accepted', updated_at = now() WHERE id = $1")
            .bind(request.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO vehicle_shares (vehicle_id, shared_by_user_id, shared_to_user_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (vehicle_id, shared_by_user_id, shared_to_user_id) DO NOTHING
            "#,
        )
        .bind(request.vehicle_id)
        .bind(request.shared_by_user_id)
        .bind(request.shared_to_user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    pub async fn list_pending_for(&self, user_id: i64) -> AppResult<Vec<PendingShareResponse>> {
        let rows = sqlx::query_as::<_, PendingShareResponse>(
            r#"
            SELECT sr.id, sr.vehicle_id, sr.shared_by_user_id, sr.created_at,
                   v.vehicle_name, v.plate_number, v.owner_name,
                   u.username AS shared_by_username
            FROM share_requests sr
            JOIN vehicles v ON sr.vehicle_id = v.id
            JOIN users u ON sr.shared_by_user_id = u.id
            WHERE sr.shared_to_user_id = $1 AND sr.status = 'pending'
            ORDER BY sr.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_sent_by(&self, user_id: i64) -> AppResult<Vec<SentShareResponse>> {
        let rows = sqlx::query_as::<_, SentShareResponse>(
            r#"
            SELECT sr.id, sr.vehicle_id, sr.shared_to_user_id, sr.status, sr.created_at, sr.updated_at,
                   v.vehicle_name, v.plate_number,
                   u.username AS shared_to_username
            FROM share_requests sr
            JOIN vehicles v ON sr.vehicle_id = v.id
            JOIN users u ON sr.shared_to_user_id = u.id
            WHERE sr.shared_by_user_id = $1
            ORDER BY sr.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

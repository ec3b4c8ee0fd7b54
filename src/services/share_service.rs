//! Flujo de compartición de vehículos
//! 
//! Máquina de estados sobre share_requests: pending -> accepted/rejected,
//! con accepted materializando un grant durable de forma idempotente.
//! El create por lotes es deliberadamente no atómico entre pares.

use sqlx::PgPool;

use crate::dto::share_dto::{
    CreateShareRequestsRequest, PendingShareResponse, SentShareResponse,
    ShareRequestsCreatedResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::share::ShareRequestStatus;
use crate::repositories::share_repository::ShareRepository;
use crate::utils::errors::{AppError, AppResult};

pub struct ShareService {
    shares: ShareRepository,
}

impl ShareService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            shares: ShareRepository::new(pool),
        }
    }

    /// Crea una solicitud pendiente por cada par (vehículo, destinatario).
    /// Cada inserción es independiente: los fallos por fila se recogen y
    /// se devuelven junto al contador de éxitos.
    pub async fn create_batch(
        &self,
        user: &AuthenticatedUser,
        request: CreateShareRequestsRequest,
    ) -> AppResult<ShareRequestsCreatedResponse> {
        if request.vehicle_ids.is_empty() || request.target_user_ids.is_empty() {
            return Err(AppError::Validation(
                "No vehicles or users selected".to_string(),
            ));
        }

        let pairs = expand_pairs(&request.vehicle_ids, &request.target_user_ids);
        let mut requests_created = 0;
        let mut errors = Vec::new();

        for (vehicle_id, target_user_id) in pairs {
            match self
                .shares
                .insert_request(vehicle_id, user.user_id, target_user_id)
                .await
            {
                Ok(_) => requests_created += 1,
                Err(e) => errors.push(format!(
                    "Vehicle {} to User {}: {}",
                    vehicle_id, target_user_id, e
                )),
            }
        }

        if !errors.is_empty() {
            log::warn!(
                "Share batch de usuario {} con fallos parciales: {} creadas, {} errores",
                user.user_id,
                requests_created,
                errors.len()
            );
        }

        Ok(ShareRequestsCreatedResponse {
            success: true,
            requests_created,
            errors: if errors.is_empty() { None } else { Some(errors) },
        })
    }

    /// Acepta una solicitud pendiente dirigida al usuario y materializa
    /// el grant. Ambas escrituras van en la misma transacción.
    pub async fn accept(&self, user: &AuthenticatedUser, request_id: i64) -> AppResult<()> {
        let request = self.find_actionable(user, request_id).await?;
        self.shares.accept(&request).await
    }

    /// Rechaza una solicitud pendiente dirigida al usuario. No crea grant.
    pub async fn reject(&self, user: &AuthenticatedUser, request_id: i64) -> AppResult<()> {
        let request = self.find_actionable(user, request_id).await?;
        self.shares
            .set_status(request.id, ShareRequestStatus::Rejected)
            .await
    }

    pub async fn list_pending(
        &self,
        user: &AuthenticatedUser,
    ) -> AppResult<Vec<PendingShareResponse>> {
        self.shares.list_pending_for(user.user_id).await
    }

    pub async fn list_sent(&self, user: &AuthenticatedUser) -> AppResult<Vec<SentShareResponse>> {
        self.shares.list_sent_by(user.user_id).await
    }

    /// Una solicitud inexistente y una dirigida a otro usuario producen el
    /// mismo NotFound: el no-destinatario no puede sondear existencia.
    async fn find_actionable(
        &self,
        user: &AuthenticatedUser,
        request_id: i64,
    ) -> AppResult<crate::models::share::ShareRequest> {
        let request = self
            .shares
            .find_for_recipient(request_id, user.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

        match request.status() {
            Some(ShareRequestStatus::Pending) => Ok(request),
            _ => Err(AppError::AlreadyProcessed(
                "Request already processed".to_string(),
            )),
        }
    }
}

/// Producto cartesiano vehículos x destinatarios, en el orden de entrada
pub fn expand_pairs(vehicle_ids: &[i64], target_user_ids: &[i64]) -> Vec<(i64, i64)> {
    let mut pairs = Vec::with_capacity(vehicle_ids.len() * target_user_ids.len());
    for &vehicle_id in vehicle_ids {
        for &target_user_id in target_user_ids {
            pairs.push((vehicle_id, target_user_id));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_pairs_cartesian_product() {
        let pairs = expand_pairs(&[1, 2], &[10, 20, 30]);

        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], (1, 10));
        assert_eq!(pairs[5], (2, 30));
    }

    #[test]
    fn test_expand_pairs_empty_sides() {
        assert!(expand_pairs(&[], &[1]).is_empty());
        assert!(expand_pairs(&[1], &[]).is_empty());
    }
}

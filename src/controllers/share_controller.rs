//! Controller del flujo de compartición

use sqlx::PgPool;

use crate::dto::share_dto::{
    CreateShareRequestsRequest, PendingShareResponse, SentShareResponse,
    ShareRequestsCreatedResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::services::share_service::ShareService;
use crate::utils::errors::AppResult;

pub struct ShareController {
    service: ShareService,
}

impl ShareController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: ShareService::new(pool),
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateShareRequestsRequest,
    ) -> AppResult<ShareRequestsCreatedResponse> {
        self.service.create_batch(user, request).await
    }

    pub async fn accept(&self, user: &AuthenticatedUser, request_id: i64) -> AppResult<()> {
        self.service.accept(user, request_id).await
    }

    pub async fn reject(&self, user: &AuthenticatedUser, request_id: i64) -> AppResult<()> {
        self.service.reject(user, request_id).await
    }

    pub async fn list_pending(
        &self,
        user: &AuthenticatedUser,
    ) -> AppResult<Vec<PendingShareResponse>> {
        self.service.list_pending(user).await
    }

    pub async fn list_sent(&self, user: &AuthenticatedUser) -> AppResult<Vec<SentShareResponse>> {
        self.service.list_sent(user).await
    }
}

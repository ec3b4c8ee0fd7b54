//! Controller de licencia/activación

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::dto::license_dto::{ActivateRequest, ActivateResponse};
use crate::models::license::LicenseStatus;
use crate::services::license_service::LicenseService;
use crate::utils::errors::{AppError, AppResult};

pub struct LicenseController {
    service: LicenseService,
}

impl LicenseController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            service: LicenseService::new(pool, config),
        }
    }

    pub async fn status(&self) -> AppResult<LicenseStatus> {
        self.service.status().await
    }

    pub async fn activate(&self, request: ActivateRequest) -> AppResult<ActivateResponse> {
        let key = request
            .key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::Validation("Key required".to_string()))?;

        self.service.activate(&key).await?;

        Ok(ActivateResponse {
            success: true,
            message: "Activation successful!".to_string(),
        })
    }
}

//! Controller de Vehicle
//! 
//! Orquesta el CRUD sobre el resolutor de acceso. Toda mutación pasa por
//! la puerta de propiedad; toda lectura sale con el status derivado.

use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::access_service::{AccessLevel, AccessService};
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleController {
    access: AccessService,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            access: AccessService::new(pool),
        }
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> AppResult<Vec<VehicleResponse>> {
        self.access.list_visible(user).await
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let vehicle = self.access.create(user, request).await?;
        let response = VehicleResponse::from_vehicle(
            vehicle,
            owner_level(user),
            Some(user.username.clone()),
            Utc::now(),
        );

        Ok(ApiResponse::success_with_message(
            response,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: i64,
        request: UpdateVehicleRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let vehicle = self.access.update(user, id, request).await?;
        let response = VehicleResponse::from_vehicle(
            vehicle,
            owner_level(user),
            Some(user.username.clone()),
            Utc::now(),
        );

        Ok(ApiResponse::success_with_message(
            response,
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: i64) -> AppResult<()> {
        self.access.delete(user, id).await
    }
}

fn owner_level(user: &AuthenticatedUser) -> AccessLevel {
    if user.role.is_admin() {
        AccessLevel::Admin
    } else {
        AccessLevel::Owner
    }
}

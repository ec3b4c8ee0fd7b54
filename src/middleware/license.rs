//! Middleware de licencia
//! 
//! Puerta de trial: toda ruta protegida exige licencia no expirada.
//! Las rutas de activación y estado quedan fuera por composición de
//! routers, no por inspección de paths.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::services::license_service::LicenseService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub async fn license_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let service = LicenseService::new(state.pool.clone(), &state.config);
    let status = service.status().await?;

    if status.is_expired {
        return Err(AppError::TrialExpired);
    }

    Ok(next.run(request).await)
}

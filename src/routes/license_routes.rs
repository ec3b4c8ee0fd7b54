use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::license_controller::LicenseController;
use crate::dto::license_dto::{ActivateRequest, ActivateResponse};
use crate::models::license::LicenseStatus;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de licencia - quedan fuera de la puerta de trial para que un
/// sistema expirado aún pueda consultarse y activarse
pub fn create_license_router() -> Router<AppState> {
    Router::new()
        .route("/license-status", get(license_status))
        .route("/activate", post(activate))
}

async fn license_status(State(state): State<AppState>) -> Result<Json<LicenseStatus>, AppError> {
    let controller = LicenseController::new(state.pool.clone(), &state.config);
    let response = controller.status().await?;
    Ok(Json(response))
}

async fn activate(
    State(state): State<AppState>,
    Json(request): Json<ActivateRequest>,
) -> Result<Json<ActivateResponse>, AppError> {
    let controller = LicenseController::new(state.pool.clone(), &state.config);
    let response = controller.activate(request).await?;
    Ok(Json(response))
}

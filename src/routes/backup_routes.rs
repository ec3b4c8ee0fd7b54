use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::backup_controller::BackupController;
use crate::dto::vehicle_dto::{BackupVehicleRow, RestoreResponse, RestoreVehicleRecord};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_backup_router() -> Router<AppState> {
    Router::new()
        .route("/backup-json", get(backup_json))
        .route("/restore", post(restore))
}

async fn backup_json(
    State(state): State<AppState>,
) -> Result<Json<Vec<BackupVehicleRow>>, AppError> {
    let controller = BackupController::new(state.pool.clone());
    let response = controller.backup_json().await?;
    Ok(Json(response))
}

async fn restore(
    State(state): State<AppState>,
    Json(records): Json<Vec<RestoreVehicleRecord>>,
) -> Result<Json<RestoreResponse>, AppError> {
    let controller = BackupController::new(state.pool.clone());
    let response = controller.restore(records).await?;
    Ok(Json(response))
}

//! Controller de backup/restore
//! 
//! Exporta todas las filas de vehículos como JSON y permite restaurar la
//! tabla completa desde ese mismo formato, un registro por inserción.

use sqlx::PgPool;

use crate::dto::vehicle_dto::{BackupVehicleRow, RestoreResponse, RestoreVehicleRecord};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppResult;

pub struct BackupController {
    vehicles: VehicleRepository,
}

impl BackupController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn backup_json(&self) -> AppResult<Vec<BackupVehicleRow>> {
        self.vehicles.dump_all().await
    }

    pub async fn restore(&self, records: Vec<RestoreVehicleRecord>) -> AppResult<RestoreResponse> {
        let count = self.vehicles.replace_all(&records).await?;

        log::info!("Restore completado: {} vehículos", count);

        Ok(RestoreResponse {
            success: true,
            count,
        })
    }
}

//! DTOs de Vehicle
//! 
//! Requests y responses para el CRUD de vehículos y el backup JSON.
//! El status nunca viaja desde el cliente: siempre se deriva al leer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::vehicle::Vehicle;
use crate::services::access_service::AccessLevel;
use crate::services::permit_status::{compute_status, PermitStatus};

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(max = 100))]
    pub owner_name: Option<String>,

    #[validate(length(max = 50))]
    pub id_number: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub plate_number: Option<String>,

    pub permit_expiry_date: NaiveDate,

    #[validate(length(max = 10))]
    pub model_year: Option<String>,

    #[validate(length(max = 100))]
    pub vehicle_name: Option<String>,

    #[validate(length(max = 50))]
    pub category: Option<String>,

    #[serde(default)]
    pub is_on_hold: bool,
}

/// Request para actualizar un vehículo existente (reemplazo completo)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(length(max = 100))]
    pub owner_name: Option<String>,

    #[validate(length(max = 50))]
    pub id_number: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub plate_number: Option<String>,

    pub permit_expiry_date: NaiveDate,

    #[validate(length(max = 10))]
    pub model_year: Option<String>,

    #[validate(length(max = 100))]
    pub vehicle_name: Option<String>,

    #[validate(length(max = 50))]
    pub category: Option<String>,

    #[serde(default)]
    pub is_on_hold: bool,
}

/// Response de vehículo para la API
///
/// access_level y owner_username viajan en snake_case, igual que los
/// alias SQL de los que salen; el resto del wire es camelCase.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: i64,
    #[serde(rename = "owner_id")]
    pub owner_id: i64,
    pub owner_name: Option<String>,
    pub id_number: Option<String>,
    pub plate_number: Option<String>,
    pub permit_expiry_date: NaiveDate,
    pub model_year: Option<String>,
    pub vehicle_name: Option<String>,
    pub category: Option<String>,
    pub is_on_hold: bool,
    pub status: PermitStatus,
    #[serde(rename = "access_level")]
    pub access_level: AccessLevel,
    #[serde(rename = "owner_username", skip_serializing_if = "Option::is_none")]
    pub owner_username: Option<String>,
}

impl VehicleResponse {
    pub fn from_vehicle(
        vehicle: Vehicle,
        access_level: AccessLevel,
        owner_username: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let status = compute_status(vehicle.permit_expiry_date, vehicle.is_on_hold, now);
        Self {
            id: vehicle.id,
            owner_id: vehicle.owner_id,
            owner_name: vehicle.owner_name,
            id_number: vehicle.id_number,
            plate_number: vehicle.plate_number,
            permit_expiry_date: vehicle.permit_expiry_date,
            model_year: vehicle.model_year,
            vehicle_name: vehicle.vehicle_name,
            category: vehicle.category,
            is_on_hold: vehicle.is_on_hold,
            status,
            access_level,
            owner_username,
        }
    }
}

/// Fila de vehículo tal como sale en el backup JSON
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BackupVehicleRow {
    pub id: i64,
    #[serde(rename = "owner_id")]
    pub owner_id: i64,
    pub owner_name: Option<String>,
    pub id_number: Option<String>,
    pub plate_number: Option<String>,
    pub permit_expiry_date: NaiveDate,
    pub model_year: Option<String>,
    pub vehicle_name: Option<String>,
    pub category: Option<String>,
    pub is_on_hold: bool,
}

/// Registro de vehículo aceptado por el restore JSON
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreVehicleRecord {
    pub owner_name: Option<String>,
    pub id_number: Option<String>,
    pub plate_number: Option<String>,
    pub permit_expiry_date: NaiveDate,
    pub model_year: Option<String>,
    pub vehicle_name: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub is_on_hold: bool,
}

/// Response del restore
#[derive(Debug, Serialize)]
pub struct RestoreResponse {
    pub success: bool,
    pub count: usize,
}

//! DTOs del flujo de compartición
//! 
//! El create por lotes reporta el fallo parcial como datos
//! (requestsCreated + errors), no como error HTTP.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Request de creación de solicitudes por lotes (producto cartesiano
/// vehículos x destinatarios)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareRequestsRequest {
    pub vehicle_ids: Vec<i64>,
    pub target_user_ids: Vec<i64>,
}

/// Response del create por lotes
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequestsCreatedResponse {
    pub success: bool,
    pub requests_created: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Solicitud pendiente dirigida al usuario actual, enriquecida con los
/// campos de display del vehículo y del remitente
#[derive(Debug, Serialize, FromRow)]
pub struct PendingShareResponse {
    pub id: i64,
    pub vehicle_id: i64,
    pub shared_by_user_id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "vehicleName")]
    pub vehicle_name: Option<String>,
    #[serde(rename = "plateNumber")]
    pub plate_number: Option<String>,
    #[serde(rename = "ownerName")]
    pub owner_name: Option<String>,
    pub shared_by_username: String,
}

/// Solicitud enviada por el usuario actual, en cualquier estado
#[derive(Debug, Serialize, FromRow)]
pub struct SentShareResponse {
    pub id: i64,
    pub vehicle_id: i64,
    pub shared_to_user_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "vehicleName")]
    pub vehicle_name: Option<String>,
    #[serde(rename = "plateNumber")]
    pub plate_number: Option<String>,
    pub shared_to_username: String,
}

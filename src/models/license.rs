//! Modelo del estado de licencia
//! 
//! El estado se deriva de las claves install_date/is_activated
//! de la tabla system_config.

use serde::Serialize;

/// Estado de la licencia/trial del sistema
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseStatus {
    pub is_activated: bool,
    pub trial_remaining: i64,
    pub is_expired: bool,
    pub install_id: String,
}

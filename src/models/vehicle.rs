//! Modelo de Vehicle
//! 
//! Este módulo contiene el struct Vehicle y sus variantes de lectura.
//! Mapea exactamente a la tabla vehicles. El campo status NUNCA se
//! persiste: se deriva en cada lectura a partir de la fecha de permiso.

use sqlx::FromRow;
use chrono::NaiveDate;

/// Vehicle - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, FromRow)]
pub struct Vehicle {
    pub id: i64,
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

/// Fila de vehículo con el username del propietario resuelto
/// (LEFT JOIN contra users - el propietario puede no existir)
#[derive(Debug, Clone, FromRow)]
pub struct VehicleWithOwner {
    pub id: i64,
    pub owner_id: i64,
    pub owner_name: Option<String>,
    pub id_number: Option<String>,
    pub plate_number: Option<String>,
    pub permit_expiry_date: NaiveDate,
    pub model_year: Option<String>,
    pub vehicle_name: Option<String>,
    pub category: Option<String>,
    pub is_on_hold: bool,
    pub owner_username: Option<String>,
}

impl VehicleWithOwner {
    pub fn into_parts(self) -> (Vehicle, Option<String>) {
        let owner_username = self.owner_username;
        let vehicle = Vehicle {
            id: self.id,
            owner_id: self.owner_id,
            owner_name: self.owner_name,
            id_number: self.id_number,
            plate_number: self.plate_number,
            permit_expiry_date: self.permit_expiry_date,
            model_year: self.model_year,
            vehicle_name: self.vehicle_name,
            category: self.category,
            is_on_hold: self.is_on_hold,
        };
        (vehicle, owner_username)
    }
}

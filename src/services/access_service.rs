//! Resolución de acceso a vehículos
//! 
//! Determina qué vehículos ve cada usuario y con qué etiqueta de acceso,
//! y aplica la puerta de propiedad sobre las mutaciones. La unión
//! propio/compartido se expresa como dos consultas combinadas en código
//! para que la regla de deduplicación sea testeable de forma aislada.

use std::collections::HashSet;

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{AppError, AppResult};

/// Etiqueta de acceso de una fila visible. Es solo display:
/// el permiso real lo deciden las consultas y la puerta de mutación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Owner,
    Shared,
    Admin,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Owner => "owner",
            AccessLevel::Shared => "shared",
            AccessLevel::Admin => "admin",
        }
    }
}

pub struct AccessService {
    vehicles: VehicleRepository,
}

impl AccessService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool),
        }
    }

    /// Lista los vehículos visibles para el usuario.
    /// 
    /// Admin ve todo con el username del propietario resuelto; el resto
    /// ve lo propio más lo compartido, sin duplicados y con precedencia
    /// de la fila propia.
    pub async fn list_visible(&self, user: &AuthenticatedUser) -> AppResult<Vec<VehicleResponse>> {
        let now = Utc::now();

        if user.role.is_admin() {
            let rows = self.vehicles.find_all_with_owner().await?;
            return Ok(rows
                .into_iter()
                .map(|row| {
                    let (vehicle, owner_username) = row.into_parts();
                    VehicleResponse::from_vehicle(vehicle, AccessLevel::Admin, owner_username, now)
                })
                .collect());
        }

        let owned = self.vehicles.find_by_owner(user.user_id).await?;
        let shared = self.vehicles.find_shared_with(user.user_id).await?;

        Ok(merge_owned_and_shared(owned, shared)
            .into_iter()
            .map(|(vehicle, level)| VehicleResponse::from_vehicle(vehicle, level, None, now))
            .collect())
    }

    /// Alta de vehículo: el propietario es siempre el usuario que llama
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> AppResult<Vehicle> {
        self.vehicles.insert(user.user_id, &request).await
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: i64,
        request: UpdateVehicleRequest,
    ) -> AppResult<Vehicle> {
        self.ensure_can_mutate(user, id).await?;
        self.vehicles.update_by_id(id, &request).await
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: i64) -> AppResult<()> {
        self.ensure_can_mutate(user, id).await?;
        self.vehicles.delete_by_id(id).await?;
        Ok(())
    }

    /// Chequeo de existencia primero, puerta de propiedad después
    async fn ensure_can_mutate(&self, user: &AuthenticatedUser, id: i64) -> AppResult<Vehicle> {
        let vehicle = self
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if !user.role.is_admin() && vehicle.owner_id != user.user_id {
            return Err(AppError::Forbidden(
                "You can only edit your own vehicles".to_string(),
            ));
        }

        Ok(vehicle)
    }
}

/// Combina lo propio con lo compartido: las filas propias van primero y
/// tienen precedencia; un vehículo a la vez propio y compartido sale una
/// sola vez como owner. Los duplicados dentro de lo compartido (varios
/// grants sobre el mismo vehículo) también colapsan.
pub fn merge_owned_and_shared(
    owned: Vec<Vehicle>,
    shared: Vec<Vehicle>,
) -> Vec<(Vehicle, AccessLevel)> {
    let mut seen: HashSet<i64> = HashSet::new();
    let mut result = Vec::with_capacity(owned.len() + shared.len());

    for vehicle in owned {
        if seen.insert(vehicle.id) {
            result.push((vehicle, AccessLevel::Owner));
        }
    }

    for vehicle in shared {
        if seen.insert(vehicle.id) {
            result.push((vehicle, AccessLevel::Shared));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn vehicle(id: i64, owner_id: i64) -> Vehicle {
        Vehicle {
            id,
            owner_id,
            owner_name: Some(format!("Owner {}", owner_id)),
            id_number: None,
            plate_number: Some(format!("PLT-{}", id)),
            permit_expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).expect("valid date"),
            model_year: None,
            vehicle_name: None,
            category: None,
            is_on_hold: false,
        }
    }

    #[test]
    fn test_merge_keeps_owner_precedence() {
        let owned = vec![vehicle(1, 7), vehicle(2, 7)];
        let shared = vec![vehicle(2, 9), vehicle(3, 9)];

        let merged = merge_owned_and_shared(owned, shared);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].0.id, 1);
        assert_eq!(merged[0].1, AccessLevel::Owner);
        assert_eq!(merged[1].0.id, 2);
        assert_eq!(merged[1].1, AccessLevel::Owner);
        assert_eq!(merged[2].0.id, 3);
        assert_eq!(merged[2].1, AccessLevel::Shared);
    }

    #[test]
    fn test_merge_collapses_duplicate_grants() {
        let shared = vec![vehicle(5, 2), vehicle(5, 3)];

        let merged = merge_owned_and_shared(vec![], shared);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].0.id, 5);
        assert_eq!(merged[0].1, AccessLevel::Shared);
    }

    #[test]
    fn test_merge_empty_inputs() {
        assert!(merge_owned_and_shared(vec![], vec![]).is_empty());
    }

    #[test]
    fn test_access_level_labels() {
        assert_eq!(AccessLevel::Owner.as_str(), "owner");
        assert_eq!(AccessLevel::Shared.as_str(), "shared");
        assert_eq!(AccessLevel::Admin.as_str(), "admin");
    }
}

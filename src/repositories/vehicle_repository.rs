//! Repositorio de Vehicle
//! 
//! Frontera de persistencia: las filas se convierten a structs tipados
//! aquí y en ningún otro sitio. Las reglas de acceso viven en
//! services/access_service; este módulo solo ejecuta SQL.

use sqlx::PgPool;

use crate::dto::vehicle_dto::{
    BackupVehicleRow, CreateVehicleRequest, RestoreVehicleRecord, UpdateVehicleRequest,
};
use crate::models::vehicle::{Vehicle, VehicleWithOwner};
use crate::utils::errors::AppResult;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        owner_id: i64,
        request: &CreateVehicleRequest,
    ) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (owner_id, owner_name, id_number, plate_number, permit_expiry_date, model_year, vehicle_name, category, is_on_hold)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&request.owner_name)
        .bind(&request.id_number)
        .bind(&request.plate_number)
        .bind(request.permit_expiry_date)
        .bind(&request.model_year)
        .bind(&request.vehicle_name)
        .bind(&request.category)
        .bind(request.is_on_hold)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Listado completo con el username del propietario (vista de admin).
    /// LEFT JOIN: un owner_id sin usuario deja owner_username a NULL.
    pub async fn find_all_with_owner(&self) -> AppResult<Vec<VehicleWithOwner>> {
        let vehicles = sqlx::query_as::<_, VehicleWithOwner>(
            r#"
            SELECT v.*, u.username AS owner_username
            FROM vehicles v
            LEFT JOIN users u ON v.owner_id = u.id
            ORDER BY v.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn find_by_owner(&self, owner_id: i64) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE owner_id = $1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    /// Vehículos alcanzables por grants aceptados hacia el usuario
    pub async fn find_shared_with(&self, user_id: i64) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT v.*
            FROM vehicles v
            JOIN vehicle_shares vs ON v.id = vs.vehicle_id
            WHERE vs.shared_to_user_id = $1
            ORDER BY v.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    /// Reemplazo completo de la fila; el owner_id nunca se toca aquí
    pub async fn update_by_id(
        &self,
        id: i64,
        request: &UpdateVehicleRequest,
    ) -> AppResult<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET owner_name = $2, id_number = $3, plate_number = $4, permit_expiry_date = $5,
                model_year = $6, vehicle_name = $7, category = $8, is_on_hold = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.owner_name)
        .bind(&request.id_number)
        .bind(&request.plate_number)
        .bind(request.permit_expiry_date)
        .bind(&request.model_year)
        .bind(&request.vehicle_name)
        .bind(&request.category)
        .bind(request.is_on_hold)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn delete_by_id(&self, id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Dump completo para el backup JSON
    pub async fn dump_all(&self) -> AppResult<Vec<BackupVehicleRow>> {
        let rows = sqlx::query_as::<_, BackupVehicleRow>("SELECT * FROM vehicles ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Restore: vacía la tabla y la repuebla desde el backup, todo en una
    /// transacción. Los registros restaurados quedan sin propietario
    /// (owner_id = 0), visibles solo para admin hasta ser reasignados.
    pub async fn replace_all(&self, records: &[RestoreVehicleRecord]) -> AppResult<usize> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM vehicles").execute(&mut *tx).await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO vehicles (owner_id, owner_name, id_number, plate_number, permit_expiry_date, model_year, vehicle_name, category, is_on_hold)
                VALUES (0, $1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(&record.owner_name)
            .bind(&record.id_number)
            .bind(&record.plate_number)
            .bind(record.permit_expiry_date)
            .bind(&record.model_year)
            .bind(&record.vehicle_name)
            .bind(&record.category)
            .bind(record.is_on_hold)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(records.len())
    }
}

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::Drone;
use crate::repositories::{DroneRepository, Repository, LAST_DRONES_LIMIT};
use crate::utils::errors::{map_db_error, AppResult};

const SELECT_DRONES: &str = "SELECT id_drone, nome, modelo, status FROM drones";

pub struct PgDroneRepository {
    pool: PgPool,
}

impl PgDroneRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Drone> for PgDroneRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Drone>> {
        let drone = sqlx::query_as::<_, Drone>(&format!("{} WHERE id_drone = $1", SELECT_DRONES))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error buscando drone", e))?;

        Ok(drone)
    }

    async fn find_all(&self) -> AppResult<Vec<Drone>> {
        let drones = sqlx::query_as::<_, Drone>(&format!("{} ORDER BY id_drone", SELECT_DRONES))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("Error listando drones", e))?;

        Ok(drones)
    }

    /// Un id existente se reemplaza; sin id o con un id desconocido se
    /// inserta con el siguiente valor de la secuencia
    async fn save(&self, drone: Drone) -> AppResult<Drone> {
        if let Some(id) = drone.id_drone {
            let updated = sqlx::query_as::<_, Drone>(
                r#"
                UPDATE drones SET nome = $2, modelo = $3, status = $4
                WHERE id_drone = $1
                RETURNING id_drone, nome, modelo, status
                "#,
            )
            .bind(id)
            .bind(drone.nome.as_str())
            .bind(drone.modelo.as_deref())
            .bind(drone.status.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error actualizando drone", e))?;

            if let Some(updated) = updated {
                return Ok(updated);
            }
        }

        let saved = sqlx::query_as::<_, Drone>(
            r#"
            INSERT INTO drones (nome, modelo, status)
            VALUES ($1, $2, $3)
            RETURNING id_drone, nome, modelo, status
            "#,
        )
        .bind(drone.nome)
        .bind(drone.modelo)
        .bind(drone.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Error guardando drone", e))?;

        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM drones WHERE id_drone = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Error borrando drone", e))?;

        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM drones WHERE id_drone = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_db_error("Error comprobando drone", e))?;

        Ok(result.0)
    }
}

#[async_trait]
impl DroneRepository for PgDroneRepository {
    async fn find_last_10(&self) -> AppResult<Vec<Drone>> {
        let drones = sqlx::query_as::<_, Drone>(&format!(
            "{} ORDER BY id_drone DESC LIMIT $1",
            SELECT_DRONES
        ))
        .bind(LAST_DRONES_LIMIT as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Error listando últimos drones", e))?;

        Ok(drones)
    }

    async fn find_all_ordered_by_name(&self) -> AppResult<Vec<Drone>> {
        // COLLATE "C": orden lexicográfico por bytes, igual que el repositorio en memoria
        let drones = sqlx::query_as::<_, Drone>(&format!(
            "{} ORDER BY nome COLLATE \"C\" ASC, id_drone ASC",
            SELECT_DRONES
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Error listando drones por nombre", e))?;

        Ok(drones)
    }
}

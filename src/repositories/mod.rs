//! Repositorios
//!
//! Contrato de almacenamiento por entidad y sus dos implementaciones:
//! PostgreSQL (sqlx) y memoria. Los controladores solo ven los traits.
//!
//! Reglas comunes a ambas implementaciones:
//! - `save` inserta si la entidad no trae id (o el id no existe) y si no
//!   reemplaza el registro completo. Devuelve la entidad ya hidratada.
//! - Borrar una misión borra en cascada sus residuos, de forma atómica.
//! - Guardar una referencia a un operador o misión inexistente es un conflicto.
//! - Borrar un operador con misiones asignadas es un conflicto y no borra nada.

use async_trait::async_trait;

use crate::models::Drone;
use crate::utils::errors::AppResult;

pub mod drone_repository;
pub mod memory_repository;
pub mod mission_repository;
pub mod operator_repository;
pub mod plastic_waste_repository;

pub use drone_repository::PgDroneRepository;
pub use memory_repository::MemoryRepository;
pub use mission_repository::PgMissionRepository;
pub use operator_repository::PgOperatorRepository;
pub use plastic_waste_repository::PgPlasticWasteRepository;

/// Operaciones CRUD de una entidad con id numérico generado
#[async_trait]
pub trait Repository<E>: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<E>>;

    async fn find_all(&self) -> AppResult<Vec<E>>;

    async fn save(&self, entity: E) -> AppResult<E>;

    /// Quien llama debe comprobar antes que el id existe
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;
}

/// Consultas adicionales de drones
#[async_trait]
pub trait DroneRepository: Repository<Drone> {
    /// Los 10 drones creados más recientemente, el más nuevo primero
    async fn find_last_10(&self) -> AppResult<Vec<Drone>>;

    /// Todos los drones ordenados por nombre ascendente
    async fn find_all_ordered_by_name(&self) -> AppResult<Vec<Drone>>;
}

/// Tamaño de la consulta de últimos drones
pub const LAST_DRONES_LIMIT: usize = 10;

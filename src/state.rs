//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El único recurso compartido entre
//! requests es el almacenamiento.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::{EnvironmentConfig, StorageBackend};
use crate::models::{Mission, Operator, PlasticWaste};
use crate::repositories::{
    DroneRepository, MemoryRepository, PgDroneRepository, PgMissionRepository,
    PgOperatorRepository, PgPlasticWasteRepository, Repository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub storage: StorageBackend,
    pub drones: Arc<dyn DroneRepository>,
    pub operators: Arc<dyn Repository<Operator>>,
    pub missions: Arc<dyn Repository<Mission>>,
    pub wastes: Arc<dyn Repository<PlasticWaste>>,
}

impl AppState {
    /// Estado respaldado por PostgreSQL
    pub fn with_postgres(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            config,
            storage: StorageBackend::Postgres,
            drones: Arc::new(PgDroneRepository::new(pool.clone())),
            operators: Arc::new(PgOperatorRepository::new(pool.clone())),
            missions: Arc::new(PgMissionRepository::new(pool.clone())),
            wastes: Arc::new(PgPlasticWasteRepository::new(pool)),
        }
    }

    /// Estado respaldado por el repositorio en memoria
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        let repository = MemoryRepository::new();
        Self {
            config,
            storage: StorageBackend::Memory,
            drones: Arc::new(repository.clone()),
            operators: Arc::new(repository.clone()),
            missions: Arc::new(repository.clone()),
            wastes: Arc::new(repository),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.public_base_url
    }
}

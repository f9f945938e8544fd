use std::sync::Arc;

use crate::models::Drone;
use crate::repositories::DroneRepository;
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// Listados de drones que no llevan enlaces
pub struct DroneController {
    repository: Arc<dyn DroneRepository>,
}

impl DroneController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.drones.clone(),
        }
    }

    pub async fn last_registered(&self) -> AppResult<Vec<Drone>> {
        self.repository.find_last_10().await
    }

    pub async fn ordered_by_name(&self) -> AppResult<Vec<Drone>> {
        self.repository.find_all_ordered_by_name().await
    }
}

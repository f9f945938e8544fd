use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::DroneController;
use crate::models::Drone;
use crate::routes::resource_routes::create_resource_router;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas CRUD de drones más los dos listados sin enlaces
pub fn create_drone_router() -> Router<AppState> {
    create_resource_router::<Drone>()
        .route("/ultimos", get(last_registered))
        .route("/ordemalfabetica", get(ordered_by_name))
}

async fn last_registered(State(state): State<AppState>) -> Result<Json<Vec<Drone>>, AppError> {
    let controller = DroneController::new(&state);
    let response = controller.last_registered().await?;
    Ok(Json(response))
}

async fn ordered_by_name(State(state): State<AppState>) -> Result<Json<Vec<Drone>>, AppError> {
    let controller = DroneController::new(&state);
    let response = controller.ordered_by_name().await?;
    Ok(Json(response))
}

pub mod drone_routes;
pub mod resource_routes;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::controllers::Resource;
use crate::middleware::cors::cors_middleware_for;
use crate::models::{Drone, Mission, Operator, PlasticWaste};
use crate::state::AppState;

/// Router completo de la API
pub fn create_router(state: AppState) -> Router {
    let cors = cors_middleware_for(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest(&Drone::ROUTES.collection_path(), drone_routes::create_drone_router())
        .nest(
            &Operator::ROUTES.collection_path(),
            resource_routes::create_resource_router::<Operator>(),
        )
        .nest(
            &Mission::ROUTES.collection_path(),
            resource_routes::create_resource_router::<Mission>(),
        )
        .nest(
            &PlasticWaste::ROUTES.collection_path(),
            resource_routes::create_resource_router::<PlasticWaste>(),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "storage": state.storage.as_str(),
    }))
}

//! Router genérico de recursos
//!
//! Las mismas cinco rutas para cada entidad; las rutas salen del
//! `RouteTemplate` del recurso, igual que sus enlaces.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};

use crate::controllers::resource_controller::{Resource, ResourceController};
use crate::dto::hateoas_dto::{CollectionModel, EntityModel};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{JsonBody, PathId};
use crate::utils::links::REL_SELF;

pub fn create_resource_router<R: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(index::<R>).post(register::<R>))
        .route(
            &R::ROUTES.item_route(),
            get(show::<R>).put(update::<R>).delete(destroy::<R>),
        )
}

async fn show<R: Resource>(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<EntityModel<R>>, AppError> {
    let controller = ResourceController::<R>::new(&state);
    let response = controller.show(id).await?;
    Ok(Json(response))
}

async fn index<R: Resource>(
    State(state): State<AppState>,
) -> Result<Json<CollectionModel<R>>, AppError> {
    let controller = ResourceController::<R>::new(&state);
    let response = controller.index().await?;
    Ok(Json(response))
}

async fn register<R: Resource>(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<R>,
) -> Result<(StatusCode, HeaderMap, Json<EntityModel<R>>), AppError> {
    let controller = ResourceController::<R>::new(&state);
    let response = controller.register(input).await?;

    let location = response
        .link(REL_SELF)
        .ok_or_else(|| AppError::Internal("Recurso creado sin enlace self".to_string()))?;
    let location = HeaderValue::from_str(&location.href)
        .map_err(|e| AppError::Internal(format!("Location inválida: {}", e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::LOCATION, location);
    Ok((StatusCode::CREATED, headers, Json(response)))
}

async fn update<R: Resource>(
    State(state): State<AppState>,
    PathId(id): PathId,
    JsonBody(input): JsonBody<R>,
) -> Result<Json<EntityModel<R>>, AppError> {
    let controller = ResourceController::<R>::new(&state);
    let response = controller.update(id, input).await?;
    Ok(Json(response))
}

async fn destroy<R: Resource>(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<StatusCode, AppError> {
    let controller = ResourceController::<R>::new(&state);
    controller.destroy(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

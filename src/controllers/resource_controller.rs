//! Controlador genérico de recursos
//!
//! Un único controlador CRUD con enlaces hipermedia, parametrizado por la
//! entidad. Cada entidad se conecta implementando [`Resource`], que le da
//! sus rutas, su id y su repositorio.
//!
//! Toda operación sobre un id comprueba primero que existe; si no existe
//! devuelve `AppError::NotFound` sin hacer nada más.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::dto::hateoas_dto::{CollectionModel, EntityModel};
use crate::repositories::Repository;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::links::{LinkBuilder, RouteTemplate};

/// Entidad expuesta como recurso REST
pub trait Resource:
    Serialize + DeserializeOwned + Validate + Debug + Clone + Send + Sync + 'static
{
    /// Repositorio que respalda el recurso
    type Store: Repository<Self> + ?Sized;

    /// Rutas del recurso, compartidas por el router y los enlaces
    const ROUTES: RouteTemplate;

    /// Nombre legible para mensajes, p.ej. "misión"
    const LABEL: &'static str;

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    fn store(state: &AppState) -> Arc<Self::Store>;
}

pub struct ResourceController<R: Resource> {
    repository: Arc<R::Store>,
    links: LinkBuilder,
}

impl<R: Resource> ResourceController<R> {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: R::store(state),
            links: LinkBuilder::new(state.base_url(), R::ROUTES),
        }
    }

    /// Recurso con enlaces self, delete y contents
    pub async fn show(&self, id: i64) -> AppResult<EntityModel<R>> {
        let entity = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error(R::LABEL, id))?;

        Ok(EntityModel::of(entity, self.links.instance_links(id)))
    }

    /// Todos los recursos, cada uno con su enlace self y el de la colección
    pub async fn index(&self) -> AppResult<CollectionModel<R>> {
        let entities = self.repository.find_all().await?;

        let content = entities
            .into_iter()
            .map(|entity| {
                let mut links = Vec::with_capacity(2);
                if let Some(id) = entity.id() {
                    links.push(self.links.self_link(id));
                }
                links.push(self.links.collection_link());
                EntityModel::of(entity, links)
            })
            .collect();

        Ok(CollectionModel::of(
            self.links.collection_name(),
            content,
            vec![self.links.collection_self_link()],
        ))
    }

    /// Valida y persiste un recurso nuevo; devuelve el recurso con su enlace self
    pub async fn register(&self, input: R) -> AppResult<EntityModel<R>> {
        info!("Registrando {} {:?}", R::LABEL, input);
        input.validate()?;

        let saved = self.repository.save(input).await?;
        let id = saved_id(&saved)?;

        info!("✅ {} registrado con id {}", R::LABEL, id);
        Ok(EntityModel::of(saved, vec![self.links.self_link(id)]))
    }

    /// Reemplazo completo: el id de la ruta gana sobre el del cuerpo
    pub async fn update(&self, id: i64, mut input: R) -> AppResult<EntityModel<R>> {
        info!("Actualizando {} {} a {:?}", R::LABEL, id, input);
        self.ensure_exists(id).await?;

        input.set_id(id);
        input.validate()?;

        let updated = self.repository.save(input).await?;
        let id = saved_id(&updated)?;
        Ok(EntityModel::of(updated, vec![self.links.self_link(id)]))
    }

    pub async fn destroy(&self, id: i64) -> AppResult<()> {
        self.ensure_exists(id).await?;

        self.repository.delete_by_id(id).await?;
        info!("🗑️ {} {} eliminado", R::LABEL, id);
        Ok(())
    }

    async fn ensure_exists(&self, id: i64) -> AppResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(not_found_error(R::LABEL, id));
        }
        Ok(())
    }
}

fn saved_id<R: Resource>(entity: &R) -> AppResult<i64> {
    entity
        .id()
        .ok_or_else(|| AppError::Internal(format!("{} guardado sin id", R::LABEL)))
}

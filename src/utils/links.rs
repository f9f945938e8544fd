//! Constructor de enlaces hipermedia
//!
//! Las rutas de cada recurso se describen con un [`RouteTemplate`]. El mismo
//! template genera las rutas que registra el router de axum y los `href`
//! que se devuelven en las respuestas, así no hay desfase entre ambos.

use crate::dto::hateoas_dto::Link;

/// Relación `self`
pub const REL_SELF: &str = "self";
/// Relación `delete`
pub const REL_DELETE: &str = "delete";
/// Relación a la colección en `show`
pub const REL_CONTENTS: &str = "contents";

/// Plantilla de rutas de un recurso: `/{collection}` y `/{collection}/:{id_param}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTemplate {
    pub collection: &'static str,
    pub id_param: &'static str,
}

impl RouteTemplate {
    pub const fn new(collection: &'static str, id_param: &'static str) -> Self {
        Self { collection, id_param }
    }

    /// Ruta de la colección, p.ej. `/missoes`
    pub fn collection_path(&self) -> String {
        format!("/{}", self.collection)
    }

    /// Ruta de un elemento dentro del router anidado, p.ej. `/:id_missao`
    pub fn item_route(&self) -> String {
        format!("/:{}", self.id_param)
    }

    /// Ruta de un elemento con el id ya sustituido, p.ej. `/missoes/1`
    pub fn item_path(&self, id: i64) -> String {
        let route = self
            .item_route()
            .replace(&format!(":{}", self.id_param), &id.to_string());
        format!("{}{}", self.collection_path(), route)
    }
}

/// Fábrica de enlaces absolutos para una plantilla de rutas
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base_url: String,
    template: RouteTemplate,
}

impl LinkBuilder {
    pub fn new(base_url: impl Into<String>, template: RouteTemplate) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, template }
    }

    pub fn item_href(&self, id: i64) -> String {
        format!("{}{}", self.base_url, self.template.item_path(id))
    }

    pub fn collection_href(&self) -> String {
        format!("{}{}", self.base_url, self.template.collection_path())
    }

    pub fn self_link(&self, id: i64) -> Link {
        Link::new(REL_SELF, self.item_href(id))
    }

    /// DELETE comparte la dirección del elemento
    pub fn delete_link(&self, id: i64) -> Link {
        Link::new(REL_DELETE, self.item_href(id))
    }

    pub fn contents_link(&self) -> Link {
        Link::new(REL_CONTENTS, self.collection_href())
    }

    /// Enlace a la colección etiquetado con el nombre plural del recurso
    pub fn collection_link(&self) -> Link {
        Link::new(self.template.collection, self.collection_href())
    }

    pub fn collection_self_link(&self) -> Link {
        Link::new(REL_SELF, self.collection_href())
    }

    /// Enlaces de `show`: self, delete y contents
    pub fn instance_links(&self, id: i64) -> Vec<Link> {
        vec![self.self_link(id), self.delete_link(id), self.contents_link()]
    }

    pub fn collection_name(&self) -> &'static str {
        self.template.collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSOES: RouteTemplate = RouteTemplate::new("missoes", "id_missao");

    #[test]
    fn test_route_template_paths() {
        assert_eq!(MISSOES.collection_path(), "/missoes");
        assert_eq!(MISSOES.item_route(), "/:id_missao");
        assert_eq!(MISSOES.item_path(12), "/missoes/12");
    }

    #[test]
    fn test_links_share_base_url() {
        let builder = LinkBuilder::new("http://localhost:8080/", MISSOES);
        assert_eq!(builder.item_href(3), "http://localhost:8080/missoes/3");
        assert_eq!(builder.collection_href(), "http://localhost:8080/missoes");

        let links = builder.instance_links(3);
        let rels: Vec<&str> = links.iter().map(|l| l.rel.as_str()).collect();
        assert_eq!(rels, vec!["self", "delete", "contents"]);
        assert_eq!(links[0].href, links[1].href);
    }

    #[test]
    fn test_relative_links_without_base_url() {
        let builder = LinkBuilder::new("", RouteTemplate::new("residuos-plasticos", "id_residuo"));
        assert_eq!(builder.self_link(1).href, "/residuos-plasticos/1");
        assert_eq!(builder.collection_link().rel, "residuos-plasticos");
    }
}

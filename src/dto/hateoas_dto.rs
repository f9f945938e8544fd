use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

// Enlace hipermedia con su relación
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }
}

#[derive(Serialize)]
struct Href<'a> {
    href: &'a str,
}

// `_links` se serializa como mapa `rel -> {href}`
fn serialize_links<S>(links: &[Link], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(links.len()))?;
    for link in links {
        map.serialize_entry(&link.rel, &Href { href: &link.href })?;
    }
    map.end()
}

// Entidad con sus enlaces
#[derive(Debug, Clone, Serialize)]
pub struct EntityModel<T> {
    #[serde(flatten)]
    pub content: T,
    #[serde(rename = "_links", serialize_with = "serialize_links")]
    pub links: Vec<Link>,
}

impl<T> EntityModel<T> {
    pub fn of(content: T, links: Vec<Link>) -> Self {
        Self { content, links }
    }

    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == rel)
    }
}

// Colección de entidades bajo `_embedded.<nombre plural>`
#[derive(Debug, Clone)]
pub struct CollectionModel<T> {
    pub name: &'static str,
    pub content: Vec<EntityModel<T>>,
    pub links: Vec<Link>,
}

impl<T> CollectionModel<T> {
    pub fn of(name: &'static str, content: Vec<EntityModel<T>>, links: Vec<Link>) -> Self {
        Self { name, content, links }
    }
}

struct Embedded<'a, T> {
    name: &'static str,
    content: &'a [EntityModel<T>],
}

impl<T: Serialize> Serialize for Embedded<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.name, self.content)?;
        map.end()
    }
}

struct Links<'a>(&'a [Link]);

impl Serialize for Links<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_links(self.0, serializer)
    }
}

impl<T: Serialize> Serialize for CollectionModel<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(
            "_embedded",
            &Embedded {
                name: self.name,
                content: &self.content,
            },
        )?;
        map.serialize_entry("_links", &Links(&self.links))?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize, Clone)]
    struct Item {
        id: i64,
    }

    #[test]
    fn test_entity_model_flattens_content() {
        let model = EntityModel::of(Item { id: 1 }, vec![Link::new("self", "/items/1")]);
        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value, json!({ "id": 1, "_links": { "self": { "href": "/items/1" } } }));
        assert_eq!(model.link("self").map(|l| l.href.as_str()), Some("/items/1"));
        assert!(model.link("delete").is_none());
    }

    #[test]
    fn test_empty_collection_keeps_embedded_key() {
        let model: CollectionModel<Item> =
            CollectionModel::of("items", vec![], vec![Link::new("self", "/items")]);
        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["_embedded"]["items"], json!([]));
        assert_eq!(value["_links"]["self"]["href"], "/items");
    }
}

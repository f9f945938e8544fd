pub mod hateoas_dto;

pub use hateoas_dto::{CollectionModel, EntityModel, Link};

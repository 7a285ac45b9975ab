pub mod service;
pub mod types;

pub use service::{CatalogService, HttpCatalogService};
pub use types::{Category, CategoryDto, CollectionDto, NftCollection, NftDto, NftShort};

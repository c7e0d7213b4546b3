// Service exports
pub mod cache;
pub mod catalog;

pub use cache::{CacheError, PoiCache};
pub use catalog::{CatalogError, JsonFileSource, PoiSource, StaticSource};

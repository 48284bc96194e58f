//! Content catalog wiring.
//!
//! Wraps the JSON catalogs under `catalog/` so views can load a validated,
//! read-only snapshot. Types here mirror the schema fields; callers use
//! `CatalogIndex` for lookups and `CatalogRepository` when several catalogs
//! are loaded together.

pub mod identity;
pub mod index;
pub mod model;
pub mod repository;

pub use identity::{ALL_CATEGORIES_LABEL, CatalogKey, Category, CategoryFilter, ItemId};
pub use index::{
    CATALOG_SCHEMA_RELATIVE_PATH, CATALOG_SCHEMA_VERSION, CatalogIndex,
    resolve_catalog_schema_path,
};
pub use model::{ContentCatalog, ContentItem, Pillar};
pub use repository::CatalogRepository;

pub use model::load_catalog_from_path;

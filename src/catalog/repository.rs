//! Holds several content catalogs for lookup by key.
//!
//! Site pages draw on more than one catalog (Spotlight articles, forum
//! meetings); the repository keeps catalog selection explicit.

use crate::catalog::identity::{CatalogKey, ItemId};
use crate::catalog::index::CatalogIndex;
use crate::catalog::model::ContentItem;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
/// In-memory store for indexed catalogs keyed by `CatalogKey`.
pub struct CatalogRepository {
    catalogs: BTreeMap<CatalogKey, CatalogIndex>,
}

impl CatalogRepository {
    /// Register a catalog, replacing any earlier catalog with the same key.
    pub fn register(&mut self, catalog: CatalogIndex) {
        self.catalogs.insert(catalog.key().clone(), catalog);
    }

    /// Fetch a catalog by key, if present.
    pub fn get(&self, key: &CatalogKey) -> Option<&CatalogIndex> {
        self.catalogs.get(key)
    }

    /// Resolve an item inside a registered catalog.
    pub fn find_item(&self, key: &CatalogKey, id: &ItemId) -> Option<&ContentItem> {
        self.get(key)?.item(id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &CatalogKey> {
        self.catalogs.keys()
    }
}

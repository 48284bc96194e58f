//! Indexed view of a content catalog.
//!
//! The index enforces the catalog schema version and provides lookup by id and
//! slug while keeping the items in file order. Duplicate ids are fatal, and so
//! is any id or slug that reads the same as another item's once rendered as a
//! route or lookup token. Items tagged with a category the filter bar does not
//! list are kept and logged.

use crate::catalog::load_catalog_from_path;
use crate::catalog::{CatalogKey, ContentCatalog, ContentItem, ItemId};
use crate::schema_loader::{is_version_token, load_json_schema, validation_errors};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CATALOG_SCHEMA_VERSION: &str = "aef_content_catalog_v1";
pub const CATALOG_SCHEMA_RELATIVE_PATH: &str = "schema/content_catalog.schema.json";

#[derive(Debug)]
/// Content catalog plus derived lookup tables.
pub struct CatalogIndex {
    catalog: ContentCatalog,
    by_id: BTreeMap<ItemId, usize>,
    by_slug: BTreeMap<String, usize>,
}

impl CatalogIndex {
    /// Load, schema-validate and index a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;
        let catalog =
            load_catalog_from_path(path).with_context(|| format!("loading {}", path.display()))?;
        Self::index(catalog).with_context(|| format!("indexing {}", path.display()))
    }

    /// Index an already-parsed catalog. Runs every check except JSON Schema.
    pub fn from_catalog(catalog: ContentCatalog) -> Result<Self> {
        validate_schema_version(&catalog.schema_version)?;
        Self::index(catalog)
    }

    fn index(catalog: ContentCatalog) -> Result<Self> {
        validate_catalog_metadata(&catalog)?;
        let (by_id, by_slug) = build_index(&catalog)?;
        warn_on_unlisted_categories(&catalog);
        debug!(
            catalog = %catalog.key,
            items = catalog.items.len(),
            "indexed content catalog"
        );
        Ok(Self {
            catalog,
            by_id,
            by_slug,
        })
    }

    pub fn key(&self) -> &CatalogKey {
        &self.catalog.key
    }

    pub fn title(&self) -> &str {
        &self.catalog.title
    }

    /// Items in catalog order.
    pub fn items(&self) -> &[ContentItem] {
        &self.catalog.items
    }

    /// Filter bar categories in display order, excluding `All`.
    pub fn categories(&self) -> &[String] {
        &self.catalog.categories
    }

    pub fn item(&self, id: &ItemId) -> Option<&ContentItem> {
        self.by_id.get(id).map(|&pos| &self.catalog.items[pos])
    }

    pub fn item_by_slug(&self, slug: &str) -> Option<&ContentItem> {
        self.by_slug.get(slug).map(|&pos| &self.catalog.items[pos])
    }

    /// Resolve a user-supplied token as an id first, then as a slug.
    pub fn resolve(&self, raw: &str) -> Option<&ContentItem> {
        self.item(&ItemId::parse(raw))
            .or_else(|| self.item(&ItemId::Slug(raw.trim().to_string())))
            .or_else(|| self.item_by_slug(raw.trim()))
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> ContentCatalog {
        self.catalog
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }
    if !is_version_token(schema_version) {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }
    if schema_version != CATALOG_SCHEMA_VERSION {
        bail!(
            "schema_version '{}' not supported (expected {})",
            schema_version,
            CATALOG_SCHEMA_VERSION
        );
    }
    Ok(())
}

fn validate_catalog_metadata(catalog: &ContentCatalog) -> Result<()> {
    if catalog.key.as_str().trim().is_empty() {
        bail!("catalog key must not be empty");
    }
    if catalog.title.trim().is_empty() {
        bail!("catalog title must not be empty");
    }
    let mut seen = BTreeSet::new();
    for label in &catalog.categories {
        if label.trim().is_empty() {
            bail!("catalog categories must not contain empty entries");
        }
        if label == crate::catalog::ALL_CATEGORIES_LABEL {
            bail!("catalog categories must not list 'All'; it is implied");
        }
        if !seen.insert(label.as_str()) {
            bail!("duplicate category '{}'", label);
        }
    }
    Ok(())
}

type Lookups = (BTreeMap<ItemId, usize>, BTreeMap<String, usize>);

fn build_index(catalog: &ContentCatalog) -> Result<Lookups> {
    let mut by_id = BTreeMap::new();
    let mut by_slug = BTreeMap::new();
    // Routes and `resolve` see ids and slugs as plain strings, so `1`, `"1"`
    // and a slug `1` all name the same page.
    let mut by_token: BTreeMap<String, usize> = BTreeMap::new();
    for (pos, item) in catalog.items.iter().enumerate() {
        if item.id.is_blank() {
            bail!("item at position {} has an empty id", pos);
        }
        if item.title.trim().is_empty() {
            bail!("item {} has an empty title", item.id);
        }
        if by_id.insert(item.id.clone(), pos).is_some() {
            bail!("duplicate item id {}", item.id);
        }
        if let Some(slug) = &item.slug {
            if by_slug.insert(slug.clone(), pos).is_some() {
                bail!("duplicate item slug {}", slug);
            }
        }
        let id_token = item.id.to_string();
        let tokens = std::iter::once(id_token.as_str())
            .chain(item.slug.as_deref().filter(|slug| *slug != id_token));
        for token in tokens {
            if let Some(&other) = by_token.get(token) {
                bail!(
                    "duplicate item route '{}': items {} and {} both resolve to it",
                    token,
                    catalog.items[other].id,
                    item.id
                );
            }
            by_token.insert(token.to_string(), pos);
        }
    }
    Ok((by_id, by_slug))
}

fn warn_on_unlisted_categories(catalog: &ContentCatalog) {
    if catalog.categories.is_empty() {
        return;
    }
    let listed: BTreeSet<&str> = catalog.categories.iter().map(String::as_str).collect();
    for item in &catalog.items {
        match item.category_str() {
            Some(category) if listed.contains(category) => {}
            Some(category) => warn!(
                catalog = %catalog.key,
                item = %item.id,
                category,
                "item category is not in the filter list; it only shows under All"
            ),
            None => warn!(
                catalog = %catalog.key,
                item = %item.id,
                "item has no category; it only shows under All"
            ),
        }
    }
}

fn validate_against_schema(catalog_path: &Path) -> Result<()> {
    let catalog_file = File::open(catalog_path)
        .with_context(|| format!("opening catalog {}", catalog_path.display()))?;
    let catalog_value: Value = serde_json::from_reader(BufReader::new(catalog_file))
        .with_context(|| format!("parsing catalog {}", catalog_path.display()))?;

    let catalog_version = catalog_value
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default();
    validate_schema_version(catalog_version)
        .with_context(|| format!("catalog {}", catalog_path.display()))?;

    let schema_path = resolve_catalog_schema_path(catalog_path);
    let allowed = BTreeSet::from([CATALOG_SCHEMA_VERSION.to_string()]);
    let schema = load_json_schema(&schema_path, &allowed)
        .with_context(|| format!("loading catalog schema {}", schema_path.display()))?;

    if let Some(details) = validation_errors(&schema, &catalog_value) {
        bail!(
            "content catalog {} failed schema validation:\n{}",
            catalog_path.display(),
            details
        );
    }
    Ok(())
}

/// Prefer a `schema/` directory next to the catalog's parent, then the
/// schema shipped with the crate.
pub fn resolve_catalog_schema_path(catalog_path: &Path) -> PathBuf {
    if let Some(base) = catalog_path.parent().and_then(|p| p.parent()) {
        let candidate = base.join(CATALOG_SCHEMA_RELATIVE_PATH);
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(CATALOG_SCHEMA_RELATIVE_PATH)
}

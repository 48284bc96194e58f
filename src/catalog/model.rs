//! Deserializable representation of the catalog files under `catalog/`.
//!
//! The types mirror `schema/content_catalog.schema.json`. Optional structured
//! fields stay `Option` so "absent" and "present but empty" remain distinct;
//! the detail presenter skips only the former. Use `CatalogIndex` for
//! validation and id lookup.

use crate::catalog::identity::{CatalogKey, Category, ItemId};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, Serialize)]
/// Full content catalog as stored on disk.
pub struct ContentCatalog {
    pub schema_version: String,
    pub key: CatalogKey,
    pub title: String,
    /// Filter bar entries, in display order, excluding `All`.
    #[serde(default)]
    pub categories: Vec<String>,
    pub items: Vec<ContentItem>,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
/// One forum or article record.
pub struct ContentItem {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_areas: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objectives: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillars: Option<Vec<Pillar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stakeholders: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
/// Titled group of sub-items (e.g. a strategic pillar and its workstreams).
pub struct Pillar {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl ContentItem {
    /// Bare record with only the required fields set.
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            slug: None,
            title: title.into(),
            category: None,
            summary: None,
            overview: None,
            image: None,
            date: None,
            key_areas: None,
            objectives: None,
            pillars: None,
            stakeholders: None,
            purpose: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(Category::new(category));
        self
    }

    pub fn category_str(&self) -> Option<&str> {
        self.category.as_ref().map(Category::as_str)
    }

    /// Date formatted the way cards display it, e.g. `March 4, 2025`.
    pub fn display_date(&self) -> Option<String> {
        self.date.map(|date| date.format("%B %-d, %Y").to_string())
    }
}

/// Read and parse a content catalog from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<ContentCatalog> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let catalog: ContentCatalog =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(catalog)
}

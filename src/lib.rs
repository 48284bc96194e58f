//! Shared library for the AEF content helpers.
//!
//! The crate loads the static content catalogs (Spotlight articles and forum
//! meetings), filters them by category, tracks the item open in the detail
//! view, and renders list, detail and full-page HTML. The helper binaries in
//! `src/bin/` are thin wrappers over these functions.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod account;
pub mod catalog;
pub mod filter;
pub mod listing;
pub mod markup;
pub mod navigation;
pub mod presenter;
pub mod runtime;
mod schema_loader;
pub mod site;

pub use account::{AccountMenu, AuthProvider, Avatar, CurrentUser, initials};
pub use catalog::{
    CatalogIndex, CatalogKey, CatalogRepository, Category, CategoryFilter, ContentCatalog,
    ContentItem, ItemId, Pillar, load_catalog_from_path,
};
pub use filter::{BrowseSession, DetailState, derive_visible};
pub use navigation::{NavigationIntent, SiteNav, SitePage, activate, route_for};
pub use presenter::{
    ClickTarget, DetailOutcome, DetailSection, detail_sections, render_detail_html,
    render_detail_text,
};

const ROOT_SENTINEL: &str = catalog::CATALOG_SCHEMA_RELATIVE_PATH;
const CATALOG_DIR: &str = "catalog";

/// Returns true when `candidate` looks like the repository root.
fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(ROOT_SENTINEL).is_file() && candidate.join(CATALOG_DIR).is_dir()
}

/// Verifies that an explicit root hint points at a valid repo.
fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the repository root holding `catalog/` and `schema/`.
///
/// Honors `AEF_ROOT` when it points at a real repo, then climbs up from the
/// current executable, then uses the build-time hint.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var(runtime::ROOT_ENV) {
        if let Some(root) = repo_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("AEF_ROOT_HINT") {
        if let Some(root) = repo_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate the content repository root. Set {} to the directory holding catalog/ and schema/.",
        runtime::ROOT_ENV
    );
}

/// Conventional catalog file for `key` under the repo root.
pub fn default_catalog_path(repo_root: &Path, key: &CatalogKey) -> PathBuf {
    repo_root
        .join(CATALOG_DIR)
        .join(format!("{}.json", key.as_str()))
}

/// Load every `*.json` catalog under `catalog/` into a repository.
///
/// Files are visited in name order so duplicate keys resolve the same way on
/// every run (the later file wins).
pub fn load_repository(repo_root: &Path) -> Result<CatalogRepository> {
    let dir = repo_root.join(CATALOG_DIR);
    let mut paths = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        bail!("No catalogs found under {}", dir.display());
    }

    let mut repository = CatalogRepository::default();
    for path in paths {
        repository.register(CatalogIndex::load(&path)?);
    }
    Ok(repository)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_catalog_path_uses_key() {
        let root = Path::new("/srv/aef");
        assert_eq!(
            default_catalog_path(root, &CatalogKey::Forums),
            PathBuf::from("/srv/aef/catalog/forums.json")
        );
    }

    #[test]
    fn repo_root_requires_schema_and_catalog_dir() {
        let dir = TempDir::new().unwrap();
        assert!(!is_repo_root(dir.path()));
        fs::create_dir_all(dir.path().join("schema")).unwrap();
        fs::write(dir.path().join(ROOT_SENTINEL), "{}").unwrap();
        assert!(!is_repo_root(dir.path()));
        fs::create_dir_all(dir.path().join(CATALOG_DIR)).unwrap();
        assert!(is_repo_root(dir.path()));
        assert!(repo_root_from_hint(&dir.path().display().to_string()).is_some());
        assert!(repo_root_from_hint("").is_none());
    }

    #[test]
    fn empty_catalog_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(CATALOG_DIR)).unwrap();
        let err = load_repository(dir.path()).expect_err("no catalogs");
        assert!(err.to_string().contains("No catalogs found"));
    }
}

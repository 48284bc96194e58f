//! Runtime helpers shared across binaries.
//!
//! Centralizes the environment variables, log setup, and flag parsing the
//! helpers have in common so each CLI behaves the same way.

use crate::catalog::CatalogKey;
use crate::{default_catalog_path, find_repo_root};
use anyhow::{Result, anyhow};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Repository root override.
pub const ROOT_ENV: &str = "AEF_ROOT";
/// `tracing` filter directives for the helpers (e.g. `aef_spotlight=debug`).
pub const LOG_ENV: &str = "AEF_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the stderr log subscriber. Safe to call more than once.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Use an explicit `--catalog` path when given, else the repo's default
/// catalog for `key`.
pub fn catalog_path_or_default(explicit: Option<PathBuf>, key: &CatalogKey) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(default_catalog_path(&find_repo_root()?, key)),
    }
}

/// Pull the value following `flag`, rejecting non-UTF-8 input.
pub fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow!("missing value for {flag}"))
}

/// Convert one raw argument to UTF-8.
pub fn arg_string(arg: OsString) -> Result<String> {
    arg.into_string()
        .map_err(|_| anyhow!("argument is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_value_reports_missing_values() {
        let mut args = vec![OsString::from("Flagship Platform")].into_iter();
        assert_eq!(
            next_value(&mut args, "--category").unwrap(),
            "Flagship Platform"
        );
        let err = next_value(&mut args, "--category").unwrap_err();
        assert_eq!(err.to_string(), "missing value for --category");
    }

    #[test]
    fn explicit_catalog_path_wins() {
        let path = catalog_path_or_default(Some(PathBuf::from("x.json")), &CatalogKey::Forums)
            .unwrap();
        assert_eq!(path, PathBuf::from("x.json"));
    }
}

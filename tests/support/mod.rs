use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::NamedTempFile;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn helper_binary(name: &str) -> PathBuf {
    let path = match name {
        "catalog-check" => env!("CARGO_BIN_EXE_catalog-check"),
        "spotlight-list" => env!("CARGO_BIN_EXE_spotlight-list"),
        "item-detail" => env!("CARGO_BIN_EXE_item-detail"),
        "render-site" => env!("CARGO_BIN_EXE_render-site"),
        other => panic!("unknown helper {other}"),
    };
    PathBuf::from(path)
}

/// Command for `name` with the repo root exported and logging quiet.
pub fn helper_command(name: &str) -> Command {
    let mut cmd = Command::new(helper_binary(name));
    cmd.env("AEF_ROOT", repo_root()).env("AEF_LOG", "error");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// The three-item catalog used throughout the suite: ids 1..3 with
/// categories A, B, A.
pub fn abc_catalog() -> Value {
    json!({
        "schema_version": "aef_content_catalog_v1",
        "key": "spotlight",
        "title": "Fixture",
        "categories": ["A", "B"],
        "items": [
            {"id": 1, "title": "Item one", "category": "A", "slug": "item-one"},
            {"id": 2, "title": "Item two", "category": "B", "slug": "item-two",
             "overview": "Second overview."},
            {"id": 3, "title": "Item three", "category": "A", "slug": "item-three"}
        ]
    })
}

pub fn write_catalog(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate catalog file")?;
    serde_json::to_writer(&mut file, value)?;
    Ok(file)
}

pub fn stdout_string(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[allow(dead_code)]
pub fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|err| panic!("reading {}: {err}", path.display()))
}

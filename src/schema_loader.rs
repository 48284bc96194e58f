//! JSON Schema loader for catalog validation.
//!
//! Reads a schema file, checks that its `schema_version` const is one the
//! caller accepts, and compiles a validator.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Where the schema pins the `schema_version` it validates.
const SCHEMA_VERSION_POINTER: &str = "/properties/schema_version/const";

pub(crate) fn load_json_schema(path: &Path, allowed_versions: &BTreeSet<String>) -> Result<JSONSchema> {
    let file = File::open(path).with_context(|| format!("opening schema {}", path.display()))?;
    let schema_value: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing schema {}", path.display()))?;

    let schema_version = extract_schema_version(&schema_value)
        .ok_or_else(|| anyhow!("schema {} missing schema_version const", path.display()))?;
    if !allowed_versions.contains(&schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed_versions
        );
    }

    // The compile error borrows the schema, so flatten it to a message here.
    JSONSchema::compile(&schema_value)
        .map_err(|err| anyhow!("compiling schema {}: {err}", path.display()))
}

/// Collect validation failures for `instance` into one newline-joined string.
pub(crate) fn validation_errors(schema: &JSONSchema, instance: &Value) -> Option<String> {
    match schema.validate(instance) {
        Ok(()) => None,
        Err(errors) => Some(
            errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
    }
}

fn extract_schema_version(schema: &Value) -> Option<String> {
    let version = schema.pointer(SCHEMA_VERSION_POINTER).and_then(Value::as_str)?;
    if is_version_token(version) {
        Some(version.to_string())
    } else {
        None
    }
}

pub(crate) fn is_version_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

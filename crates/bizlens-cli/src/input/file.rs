use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use bizlens_core::EstimationConstants;

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = read_contents(&canonical)?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// Load estimation constants from a JSON or YAML file, chosen by extension.
/// Without a path the built-in defaults are used.
pub fn read_constants(
    path: Option<&str>,
) -> Result<EstimationConstants, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(EstimationConstants::default());
    };
    let canonical = resolve_path(path)?;
    let is_yaml = canonical
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let contents = read_contents(&canonical)?;
    let constants: EstimationConstants = if is_yaml {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    tracing::debug!(path = %canonical.display(), "estimation constants loaded");
    Ok(constants)
}

fn read_contents(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    Ok(fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?)
}

/// Resolve the path against the working directory and check it is a file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

//! Manifest discovery and loading.

use crate::config::schema::Manifest;
use crate::error::{CommandError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_MANIFEST: &str = "commando.yml";

/// Load a manifest file.
///
/// # Errors
///
/// Returns `ManifestNotFound` if the file doesn't exist.
/// Returns `ManifestParse` if the YAML is invalid.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CommandError::ManifestNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CommandError::Io(e)
        }
    })?;

    parse_manifest(&content, path)
}

/// Parse YAML content into a manifest.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_manifest(content: &str, source_path: &Path) -> Result<Manifest> {
    let manifest: Manifest = if content.trim().is_empty() {
        Manifest::default()
    } else {
        serde_yaml::from_str(content).map_err(|e| CommandError::ManifestParse {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?
    };

    if manifest.settings.help_per_page == 0 {
        return Err(CommandError::ManifestParse {
            path: source_path.to_path_buf(),
            message: "settings.help_per_page must be at least 1".to_string(),
        });
    }
    Ok(manifest)
}

/// Load a manifest with an optional path override.
///
/// An explicit path must exist. Without one, `commando.yml` in `dir` is
/// used when present and an empty manifest otherwise.
pub fn load_config(dir: &Path, config_override: Option<&Path>) -> Result<Manifest> {
    if let Some(path) = config_override {
        return load_manifest(path);
    }
    let path = default_path(dir);
    match load_manifest(&path) {
        Err(CommandError::ManifestNotFound { path }) => {
            tracing::warn!(path = %path.display(), "no manifest found, starting with built-in commands only");
            Ok(Manifest::default())
        }
        other => other,
    }
}

/// Path of the default manifest in `dir`.
pub fn default_path(dir: &Path) -> PathBuf {
    dir.join(DEFAULT_MANIFEST)
}

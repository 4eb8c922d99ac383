//! Storage Layer
//!
//! Locates the configuration directory and prepares the export directory.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "textlens", "TextLens")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let config_dir = proj_dirs.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}

/// Create the export directory if it does not exist yet
///
/// Nothing is written into it until the user saves an export.
pub fn ensure_output_dir(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    debug!("Output directory ready at {:?}", dir);
    Ok(dir.to_path_buf())
}

//! Location of the persisted token pair.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// Token file name inside the data directory.
const TOKEN_FILE: &str = "tokens.json";

/// Resolve the token file, creating the default data directory if needed.
pub fn token_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let dirs =
        ProjectDirs::from("com", "gtxbet", "gtx").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join(TOKEN_FILE))
}

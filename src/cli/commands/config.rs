//! Init-config command implementation

use crate::cli::error::CliError;
use crate::config::{CONFIG_FILENAME, sample_config};
use std::path::{Path, PathBuf};

/// Write the sample configuration into `dir`. Refuses to overwrite unless `force`.
pub fn handle_init_config(dir: &Path, force: bool) -> Result<PathBuf, CliError> {
    if !dir.is_dir() {
        return Err(CliError::FileNotFound(dir.to_path_buf()));
    }

    let path = dir.join(CONFIG_FILENAME);
    if path.exists() && !force {
        return Err(CliError::InvalidArgument(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        )));
    }

    std::fs::write(&path, sample_config())
        .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?;
    println!("Wrote {}", path.display());
    Ok(path)
}

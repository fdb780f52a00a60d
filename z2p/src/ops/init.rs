//! Init operation - scaffold the project configuration.

use std::path::{Path, PathBuf};

use eyre::{Result, bail};
use zod2py_core::File;
use zod2py_schema::{ConfigFile, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TOML};

/// Write the default `zod2py.toml` into `dir`.
///
/// Refuses when the directory already has any recognised configuration file.
pub fn init(dir: &Path) -> Result<PathBuf> {
    if let Some(existing) = ConfigFile::find(dir) {
        bail!("'{}' already exists", existing.display());
    }

    let path = dir.join(DEFAULT_CONFIG_FILE);
    File::new(&path, DEFAULT_CONFIG_TOML).if_missing().write()?;
    tracing::debug!(path = %path.display(), "wrote configuration");
    Ok(path)
}

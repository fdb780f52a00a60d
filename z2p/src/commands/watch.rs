use std::{path::PathBuf, time::Duration};

use clap::Args;
use eyre::{Context, Result};
use zod2py_schema::ConfigFile;

use super::{UnwrapOrExit, project_dir};
use crate::ops;

#[derive(Args)]
pub struct WatchCommand {
    /// Project directory containing the config (defaults to current directory)
    #[arg(short = 'C', long)]
    pub dir: Option<PathBuf>,

    /// Milliseconds to wait for changes to settle before regenerating
    #[arg(long, default_value_t = 200)]
    pub debounce: u64,
}

impl WatchCommand {
    pub fn run(&self) -> Result<()> {
        // Watcher events carry canonical paths.
        let dir = project_dir(&self.dir)?;
        let dir = dir
            .canonicalize()
            .wrap_err_with(|| format!("Failed to resolve '{}'", dir.display()))?;
        let project = ConfigFile::discover(&dir).unwrap_or_exit();

        ops::watch(project, Duration::from_millis(self.debounce))
    }
}

use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::load_project;
use crate::{
    ops::{self, clean::CleanOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CleanCommand {
    /// Project directory containing the config (defaults to current directory)
    #[arg(short = 'C', long)]
    pub dir: Option<PathBuf>,

    /// Preview what would be deleted without actually deleting
    #[arg(long)]
    pub dry_run: bool,
}

impl CleanCommand {
    pub fn run(&self) -> Result<()> {
        let project = load_project(&self.dir)?;

        let report = ops::clean(
            &project,
            CleanOptions {
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}

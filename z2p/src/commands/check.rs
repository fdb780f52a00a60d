use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::load_project;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Project directory containing the config (defaults to current directory)
    #[arg(short = 'C', long)]
    pub dir: Option<PathBuf>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let project = load_project(&self.dir)?;
        let report = ops::check(&project)?;

        report.render(&mut TerminalOutput::new());
        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}

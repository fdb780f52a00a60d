use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use zod2py_codegen_python::Generator;

use super::load_project;
use crate::{
    ops::{self, generate::GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct RunCommand {
    /// Project directory containing the config (defaults to current directory)
    #[arg(short = 'C', long)]
    pub dir: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl RunCommand {
    pub fn run(&self) -> Result<()> {
        let project = load_project(&self.dir)?;

        let report = ops::generate(
            &project,
            &mut Generator::new(),
            GenerateOptions {
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        if report.failed() > 0 {
            std::process::exit(1);
        }
        Ok(())
    }
}

use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::project_dir;
use crate::ops;

#[derive(Args)]
pub struct InitCommand {
    /// Project directory (defaults to current directory)
    #[arg(short = 'C', long)]
    pub dir: Option<PathBuf>,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let dir = project_dir(&self.dir)?;
        let path = ops::init(&dir)?;

        println!("Created {}", path.display());
        println!();
        println!("Next steps:");
        println!("  add schema descriptors matching `files`, e.g. src/team.z2p.json");
        println!("  zod2py run");

        Ok(())
    }
}

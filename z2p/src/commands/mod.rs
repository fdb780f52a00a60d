mod check;
mod clean;
mod completions;
mod init;
mod run;
mod watch;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use clean::CleanCommand;
use completions::CompletionsCommand;
use eyre::{Context, Result};
use init::InitCommand;
use run::RunCommand;
use watch::WatchCommand;
use zod2py_schema::ConfigFile;

/// Extension trait for exiting on schema and config errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for zod2py_schema::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "zod2py")]
#[command(version)]
#[command(about = "Generate Python type declarations from zod schemas")]
pub(crate) struct Cli {
    /// Log more (-v for debug, -vv for trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Run(cmd) => cmd.run(),
            Commands::Watch(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Clean(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a zod2py.toml in the current directory
    Init(InitCommand),

    /// Generate Python modules for every matching schema file
    Run(RunCommand),

    /// Generate, then regenerate whenever schemas or the config change
    Watch(WatchCommand),

    /// Translate every schema in memory and report diagnostics
    Check(CheckCommand),

    /// Remove generated Python modules
    Clean(CleanCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Project directory given on the command line, made absolute.
fn project_dir(dir: &Option<PathBuf>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().wrap_err("Failed to get current directory")?;
    Ok(match dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => cwd.join(dir),
        None => cwd,
    })
}

/// Load the project configuration, exiting with a report when it is missing or invalid.
fn load_project(dir: &Option<PathBuf>) -> Result<ConfigFile> {
    let dir = project_dir(dir)?;
    Ok(ConfigFile::discover(&dir).unwrap_or_exit())
}

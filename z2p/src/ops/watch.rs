//! Watch operation - regenerate on schema and config changes.

use std::{
    path::{Path, PathBuf},
    sync::mpsc::channel,
    time::Duration,
};

use eyre::{Context, Result};
use notify::RecursiveMode;
use notify_debouncer_mini::{DebounceEventResult, new_debouncer};
use zod2py_codegen_python::Generator;
use zod2py_schema::{CONFIG_FILES, ConfigFile};

use super::{
    display_path, generate, generate::GenerateOptions, generate_module, remove_output,
    render_error,
};
use crate::reports::{ModuleReport, Output, Report, RunReport, TerminalOutput};

/// What handling one changed path did.
#[derive(Debug)]
pub enum WatchOutcome {
    /// The path is neither the config nor a matched schema file.
    Ignored,
    /// A schema file was regenerated.
    Generated(ModuleReport),
    /// A schema file is gone; holds its deleted output, if there was one.
    Removed(Option<String>),
    /// The config was reloaded and every module regenerated.
    ConfigReloaded {
        /// Outputs the old config produced that the new one does not.
        removed: Vec<String>,
        report: RunReport,
    },
    /// The config file was touched but its content is equivalent.
    ConfigUnchanged,
    /// The new config is invalid or missing; the previous one stays in use.
    ConfigRejected(String),
}

/// Watch state: the active config and one generator for the whole session.
pub struct WatchSession {
    project: ConfigFile,
    generator: Generator,
}

impl WatchSession {
    pub fn new(project: ConfigFile) -> Self {
        Self {
            project,
            generator: Generator::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.project.root()
    }

    pub fn project(&self) -> &ConfigFile {
        &self.project
    }

    pub fn generate_all(&mut self) -> Result<RunReport> {
        generate(
            &self.project,
            &mut self.generator,
            GenerateOptions { dry_run: false },
        )
    }

    /// React to a change at `path`; existence on disk decides change vs removal.
    pub fn handle(&mut self, path: &Path) -> Result<WatchOutcome> {
        if self.is_config(path) {
            return self.reload_config();
        }
        if !self.project.matches(path) {
            return Ok(WatchOutcome::Ignored);
        }

        if path.is_file() {
            let report = generate_module(&self.project, &mut self.generator, path, false)?;
            Ok(WatchOutcome::Generated(report))
        } else {
            let output = self.project.output_path(path);
            let removed = remove_output(&self.project, path)?
                .then(|| display_path(self.root(), &output));
            Ok(WatchOutcome::Removed(removed))
        }
    }

    fn is_config(&self, path: &Path) -> bool {
        path.parent() == Some(self.root())
            && path
                .file_name()
                .is_some_and(|name| CONFIG_FILES.iter().any(|c| name == *c))
    }

    fn reload_config(&mut self) -> Result<WatchOutcome> {
        let next = match ConfigFile::discover(self.root()) {
            Ok(next) => next,
            Err(e) => return Ok(WatchOutcome::ConfigRejected(render_error(e))),
        };
        if next == self.project {
            return Ok(WatchOutcome::ConfigUnchanged);
        }

        let mut removed = Vec::new();
        for source in self.project.source_files() {
            let old_output = self.project.output_path(&source);
            if next.matches(&source) && next.output_path(&source) == old_output {
                continue;
            }
            if remove_output(&self.project, &source)? {
                removed.push(display_path(self.root(), &old_output));
            }
        }

        tracing::info!(config = %display_path(self.root(), &next.path), "configuration reloaded");
        self.project = next;
        let report = self.generate_all()?;
        Ok(WatchOutcome::ConfigReloaded { removed, report })
    }
}

/// Generate once, then keep regenerating until the process is stopped.
///
/// Failures while handling a change are reported and never end the watch.
pub fn watch(project: ConfigFile, debounce: Duration) -> Result<()> {
    let mut session = WatchSession::new(project);
    session.generate_all()?.render(&mut TerminalOutput::new());

    let (tx, rx) = channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(debounce, tx).wrap_err("Failed to start file watcher")?;
    debouncer
        .watcher()
        .watch(session.root(), RecursiveMode::Recursive)
        .wrap_err_with(|| format!("Failed to watch '{}'", session.root().display()))?;
    tracing::info!(root = %session.root().display(), "watching for changes");

    for result in rx {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("watch error: {e}");
                continue;
            }
        };

        let mut paths: Vec<PathBuf> = events.into_iter().map(|event| event.path).collect();
        paths.sort();
        paths.dedup();
        for path in paths {
            match session.handle(&path) {
                Ok(outcome) => report_outcome(&session, &outcome),
                Err(e) => tracing::error!("{e:#}"),
            }
        }
    }

    Ok(())
}

fn report_outcome(session: &WatchSession, outcome: &WatchOutcome) {
    let mut out = TerminalOutput::new();
    match outcome {
        WatchOutcome::Ignored | WatchOutcome::Removed(None) => {}
        WatchOutcome::Generated(module) => {
            module.render_problems(&mut out);
            if module.is_failed() {
                tracing::error!(source = %module.source, "not generated");
            }
        }
        WatchOutcome::Removed(Some(output)) => {
            tracing::debug!(output = %output, "schema file removed");
        }
        WatchOutcome::ConfigReloaded { removed, report } => {
            tracing::debug!(removed = removed.len(), "outputs of previous configuration removed");
            report.render(&mut out);
        }
        WatchOutcome::ConfigUnchanged => {
            tracing::debug!(
                config = %display_path(session.root(), &session.project().path),
                "configuration unchanged"
            );
        }
        WatchOutcome::ConfigRejected(error) => {
            tracing::error!("configuration rejected, keeping the previous one");
            out.preformatted(error);
        }
    }
}

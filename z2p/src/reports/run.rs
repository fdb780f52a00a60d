//! Run command report data structures.

use zod2py_codegen::Diagnostic;

use super::{
    output::{Output, Report},
    render_diagnostic,
};

/// What happened to one schema module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleStatus {
    /// The output file was created or updated.
    Written,
    /// The output file already had the generated content.
    Unchanged,
    /// The module exports nothing and its old output was deleted.
    Removed,
    /// The module exports nothing and there was no output to delete.
    Empty,
    /// The module could not be loaded or translated; nothing was written.
    Failed,
    /// Dry run: the code that would be written.
    Preview(String),
}

/// Result of generating one schema module.
#[derive(Debug, Clone)]
pub struct ModuleReport {
    /// Schema file, relative to the project root.
    pub source: String,
    /// Output file, relative to the project root.
    pub output: String,
    pub status: ModuleStatus,
    /// Diagnostics from translation.
    pub diagnostics: Vec<Diagnostic>,
    /// Rendered load error, if the module could not be read.
    pub error: Option<String>,
}

impl ModuleReport {
    pub fn is_failed(&self) -> bool {
        self.status == ModuleStatus::Failed
    }

    /// Render diagnostics and load errors only.
    pub fn render_problems(&self, out: &mut dyn Output) {
        if let Some(error) = &self.error {
            out.error(&format!("could not load {}", self.source));
            out.preformatted(error);
        }
        for diag in &self.diagnostics {
            render_diagnostic(out, &self.source, diag);
        }
    }
}

/// Report data from generating every module of a project.
#[derive(Debug)]
pub struct RunReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    pub modules: Vec<ModuleReport>,
}

impl RunReport {
    fn count(&self, status: &ModuleStatus) -> usize {
        self.modules.iter().filter(|m| &m.status == status).count()
    }

    pub fn failed(&self) -> usize {
        self.count(&ModuleStatus::Failed)
    }

    fn render_preview(&self, out: &mut dyn Output) {
        let mut previews = 0;
        for module in &self.modules {
            if let ModuleStatus::Preview(code) = &module.status {
                out.divider(&module.output);
                out.preformatted(code);
                previews += 1;
            }
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} file{} would be generated",
            previews,
            if previews == 1 { "" } else { "s" }
        ));
    }

    fn render_written(&self, out: &mut dyn Output) {
        let written: Vec<_> = self
            .modules
            .iter()
            .filter(|m| m.status == ModuleStatus::Written)
            .collect();
        let removed: Vec<_> = self
            .modules
            .iter()
            .filter(|m| m.status == ModuleStatus::Removed)
            .collect();

        if !written.is_empty() {
            out.section("Generated");
            for module in written {
                out.added_item(&module.output);
            }
        }
        if !removed.is_empty() {
            out.section("Removed (no exports)");
            for module in removed {
                out.removed_item(&module.output);
            }
        }

        out.preformatted(&format!(
            "{} written, {} unchanged, {} failed",
            self.count(&ModuleStatus::Written),
            self.count(&ModuleStatus::Unchanged),
            self.failed()
        ));
    }
}

impl Report for RunReport {
    fn render(&self, out: &mut dyn Output) {
        for module in &self.modules {
            module.render_problems(out);
        }

        if self.modules.is_empty() {
            out.preformatted("No schema files matched.");
            return;
        }

        if self.dry_run {
            self.render_preview(out);
        } else {
            self.render_written(out);
        }
    }
}

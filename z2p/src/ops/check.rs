//! Check operation - translate every schema without writing.

use eyre::Result;
use zod2py_codegen_python::{Generator, Output};
use zod2py_schema::{ConfigFile, SchemaModule};

use super::{display_path, render_error};
use crate::reports::{CheckReport, ModuleReport, ModuleStatus};

/// Execute the check operation.
///
/// Loads and translates every schema file in memory and collects diagnostics.
pub fn check(project: &ConfigFile) -> Result<CheckReport> {
    let root = project.root();
    let mut generator = Generator::new();
    let mut modules = Vec::new();

    for source in project.source_files() {
        let output = project.output_path(&source);
        let mut report = ModuleReport {
            source: display_path(root, &source),
            output: display_path(root, &output),
            status: ModuleStatus::Failed,
            diagnostics: Vec::new(),
            error: None,
        };

        match SchemaModule::from_file(&source) {
            Ok(module) => {
                let unit = generator.generate(&module);
                report.status = match unit.output {
                    Output::Code(_) => ModuleStatus::Unchanged,
                    Output::Empty => ModuleStatus::Empty,
                    Output::Failed => ModuleStatus::Failed,
                };
                report.diagnostics = unit.diagnostics;
            }
            Err(e) => report.error = Some(render_error(e)),
        }
        modules.push(report);
    }

    Ok(CheckReport {
        config_path: display_path(root, &project.path),
        modules,
    })
}

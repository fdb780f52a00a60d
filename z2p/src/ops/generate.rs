//! Generate operation - schema modules to Python files.

use std::path::Path;

use eyre::Result;
use zod2py_codegen_python::{Generator, Output};
use zod2py_core::{File, WriteResult, remove_file};
use zod2py_schema::{ConfigFile, SchemaModule};

use super::{display_path, render_error};
use crate::reports::{ModuleReport, ModuleStatus, RunReport};

/// Options for the generate operation.
pub struct GenerateOptions {
    /// Whether to preview without writing.
    pub dry_run: bool,
}

/// Execute the generate operation over every schema file of the project.
///
/// A module that fails to load or translate is reported and skipped; the
/// remaining modules are still generated.
pub fn generate(
    project: &ConfigFile,
    generator: &mut Generator,
    opts: GenerateOptions,
) -> Result<RunReport> {
    let sources = project.source_files();
    tracing::debug!(count = sources.len(), "found schema files");

    let mut modules = Vec::with_capacity(sources.len());
    for source in &sources {
        modules.push(generate_module(project, generator, source, opts.dry_run)?);
    }

    Ok(RunReport {
        dry_run: opts.dry_run,
        modules,
    })
}

/// Generate the Python module for one schema file.
///
/// Only file system failures on the output side are returned as errors.
pub fn generate_module(
    project: &ConfigFile,
    generator: &mut Generator,
    source: &Path,
    dry_run: bool,
) -> Result<ModuleReport> {
    let root = project.root();
    let output = project.output_path(source);
    let mut report = ModuleReport {
        source: display_path(root, source),
        output: display_path(root, &output),
        status: ModuleStatus::Failed,
        diagnostics: Vec::new(),
        error: None,
    };

    if output == source {
        report.error = Some(format!(
            "output path '{}' is the schema file itself; check `output` in {}",
            report.output,
            display_path(root, &project.path)
        ));
        return Ok(report);
    }

    let module = match SchemaModule::from_file(source) {
        Ok(module) => module,
        Err(e) => {
            report.error = Some(render_error(e));
            return Ok(report);
        }
    };

    let unit = generator.generate(&module);
    report.status = match &unit.output {
        Output::Code(code) if dry_run => ModuleStatus::Preview(code.clone()),
        Output::Code(code) => match File::new(&output, code.as_str()).write()? {
            WriteResult::Written => {
                tracing::info!(output = %report.output, "generated");
                ModuleStatus::Written
            }
            WriteResult::Skipped => {
                tracing::debug!(output = %report.output, "unchanged");
                ModuleStatus::Unchanged
            }
        },
        Output::Empty if dry_run => ModuleStatus::Empty,
        Output::Empty => {
            if remove_output(project, source)? {
                ModuleStatus::Removed
            } else {
                ModuleStatus::Empty
            }
        }
        Output::Failed => ModuleStatus::Failed,
    };
    report.diagnostics = unit.diagnostics;

    Ok(report)
}

/// Delete the generated output of a schema file, if present.
pub fn remove_output(project: &ConfigFile, source: &Path) -> Result<bool> {
    let output = project.output_path(source);
    if output == source {
        return Ok(false);
    }
    let removed = remove_file(&output)?;
    if removed {
        tracing::info!(output = %display_path(project.root(), &output), "removed");
    }
    Ok(removed)
}

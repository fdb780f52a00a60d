//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod clean;
mod output;
mod run;

use zod2py_codegen::{Diagnostic, Severity};

pub use check::CheckReport;
pub use clean::CleanReport;
#[cfg(test)]
pub use output::BufferOutput;
pub use output::{Output, Report, TerminalOutput};
pub use run::{ModuleReport, ModuleStatus, RunReport};

/// Render one generator diagnostic, pointing at the schema file it came from.
pub(crate) fn render_diagnostic(out: &mut dyn Output, source: &str, diag: &Diagnostic) {
    let msg = match &diag.location {
        Some(loc) => format!("{}\n  --> {} ({})", diag.message, source, loc),
        None => format!("{}\n  --> {}", diag.message, source),
    };
    match diag.severity {
        Severity::Error => out.error(&msg),
        Severity::Warning => out.warning(&msg),
    }
}

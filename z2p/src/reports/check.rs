//! Check command report data structures.

use super::{
    ModuleReport,
    output::{Output, Report},
};

/// Report data from checking every schema module of a project.
#[derive(Debug)]
pub struct CheckReport {
    /// Config file, relative to the project root.
    pub config_path: String,
    pub modules: Vec<ModuleReport>,
}

impl CheckReport {
    /// Whether the check passed (nothing failed to load or translate).
    pub fn is_valid(&self) -> bool {
        !self
            .modules
            .iter()
            .any(|m| m.is_failed() || m.diagnostics.iter().any(|d| d.severity.is_error()))
    }

    pub fn warning_count(&self) -> usize {
        self.modules
            .iter()
            .flat_map(|m| &m.diagnostics)
            .filter(|d| d.severity.is_warning())
            .count()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for module in &self.modules {
            module.render_problems(out);
        }

        let count = self.modules.len();
        let problems = !self.is_valid() || self.warning_count() > 0;
        if problems {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} schema file{} checked ({})",
                count,
                if count == 1 { "" } else { "s" },
                self.config_path
            ));
        } else {
            let failed = self.modules.iter().filter(|m| m.is_failed()).count();
            out.preformatted(&format!(
                "✗ {} of {} schema file{} failed",
                failed,
                count,
                if count == 1 { "" } else { "s" }
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use zod2py_codegen::Diagnostic;

    use super::*;
    use crate::reports::{BufferOutput, ModuleStatus};

    #[test]
    fn test_valid_with_warning() {
        let report = CheckReport {
            config_path: "zod2py.toml".into(),
            modules: vec![ModuleReport {
                source: "src/a.z2p.json".into(),
                output: "src/z2p/a.py".into(),
                status: ModuleStatus::Unchanged,
                diagnostics: vec![
                    Diagnostic::warning("translate", "unsupported schema kind 'pipeline'")
                        .at("A~p"),
                ],
                error: None,
            }],
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert!(report.is_valid());
        assert_eq!(
            out.text(),
            "warning: unsupported schema kind 'pipeline'\n  --> src/a.z2p.json (A~p)\n\
             \n\
             ✓ 1 schema file checked (zod2py.toml)"
        );
    }
}

//! Clean command report data structures.

use super::output::{Output, Report};

/// Report data from removing generated files.
#[derive(Debug)]
pub struct CleanReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Deleted output files, relative to the project root.
    pub deleted: Vec<String>,
}

impl Report for CleanReport {
    fn render(&self, out: &mut dyn Output) {
        if self.deleted.is_empty() {
            out.preformatted("No generated files found.");
            return;
        }

        if self.dry_run {
            out.section("Would delete");
        } else {
            out.section("Deleted");
        }
        for path in &self.deleted {
            out.removed_item(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferOutput;

    #[test]
    fn test_render_dry_run() {
        let report = CleanReport {
            dry_run: true,
            deleted: vec!["src/z2p/a.py".into()],
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(out.text(), "Would delete:\n  - src/z2p/a.py");
    }
}

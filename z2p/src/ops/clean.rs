//! Clean operation - remove generated Python files.

use eyre::Result;
use zod2py_schema::ConfigFile;

use super::{display_path, remove_output};
use crate::reports::CleanReport;

/// Options for the clean operation.
pub struct CleanOptions {
    /// Whether to preview without deleting.
    pub dry_run: bool,
}

/// Execute the clean operation.
///
/// Removes the output of every schema file currently matched by the config.
pub fn clean(project: &ConfigFile, opts: CleanOptions) -> Result<CleanReport> {
    let root = project.root();
    let mut deleted = Vec::new();

    for source in project.source_files() {
        let output = project.output_path(&source);
        if output == source || !output.is_file() {
            continue;
        }
        if opts.dry_run || remove_output(project, &source)? {
            deleted.push(display_path(root, &output));
        }
    }

    Ok(CleanReport {
        dry_run: opts.dry_run,
        deleted,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn setup() -> (TempDir, ConfigFile) {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("zod2py.toml");
        fs::write(&config, "").unwrap();
        fs::create_dir_all(temp.path().join("src/z2p")).unwrap();
        fs::write(temp.path().join("src/a.z2p.json"), "{}").unwrap();
        fs::write(temp.path().join("src/b.z2p.json"), "{}").unwrap();
        fs::write(temp.path().join("src/z2p/a.py"), "generated").unwrap();
        fs::write(temp.path().join("src/z2p/other.py"), "hand written").unwrap();
        let project = ConfigFile::from_file(config).unwrap();
        (temp, project)
    }

    #[test]
    fn test_clean_removes_outputs_only() {
        let (temp, project) = setup();

        let report = clean(&project, CleanOptions { dry_run: false }).unwrap();

        assert_eq!(report.deleted, vec!["src/z2p/a.py".to_string()]);
        assert!(!temp.path().join("src/z2p/a.py").exists());
        assert!(temp.path().join("src/z2p/other.py").exists());
        assert!(temp.path().join("src/a.z2p.json").exists());
    }

    #[test]
    fn test_dry_run_keeps_files() {
        let (temp, project) = setup();

        let report = clean(&project, CleanOptions { dry_run: true }).unwrap();

        assert_eq!(report.deleted, vec!["src/z2p/a.py".to_string()]);
        assert!(temp.path().join("src/z2p/a.py").exists());
    }
}

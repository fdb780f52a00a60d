//! Project configuration: which descriptor files to read and where to write
//! the generated Python.

use std::{
    path::{Component, Path, PathBuf},
    str::FromStr,
};

use glob::{MatchOptions, Pattern};
use miette::SourceSpan;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, module_stem};

/// Name of the configuration file written by `zod2py init`.
pub const DEFAULT_CONFIG_FILE: &str = "zod2py.toml";

/// Configuration file names, in discovery order.
pub const CONFIG_FILES: &[&str] = &[DEFAULT_CONFIG_FILE, "zod2py.config.json", ".zod2py.json"];

const FOLDER: &str = "{FOLDER}";
const FILE: &str = "{FILE}";

/// Directories never searched for descriptor files.
const IGNORED_DIRS: &[&str] = &["node_modules", "target"];

/// Content of a fresh `zod2py.toml`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# zod2py configuration

# Schema descriptor files to translate, relative to this file.
files = ["src/**/*.z2p.json"]

# Where to write each generated module.
# {FOLDER} is the descriptor's directory, {FILE} its name up to the first '.'.
output = "{FOLDER}/z2p/{FILE}.py"
"#;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Glob patterns selecting descriptor files
    #[serde(default = "default_files")]
    pub files: Vec<String>,

    /// Output path template
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_files() -> Vec<String> {
    vec!["src/**/*.z2p.json".to_string()]
}

fn default_output() -> String {
    "{FOLDER}/z2p/{FILE}.py".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: default_files(),
            output: default_output(),
        }
    }
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, DEFAULT_CONFIG_FILE)
    }
}

impl Config {
    /// Parse a configuration; the format follows the extension of `filename`
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let config: Self = if filename.ends_with(".toml") {
            toml::from_str(content).map_err(|e| Error::parse_toml(e, content, filename))?
        } else {
            serde_json::from_str(content).map_err(|e| Error::parse_json(e, content, filename))?
        };
        config.validate(content, filename)?;
        Ok(config)
    }

    fn validate(&self, src: &str, filename: &str) -> Result<()> {
        if self.files.is_empty() {
            return Err(Error::invalid_config(
                "`files` must contain at least one pattern",
                "add a pattern such as \"src/**/*.z2p.json\"",
                src,
                filename,
                find_span(src, "files"),
            ));
        }

        for pattern in &self.files {
            if !pattern.ends_with(".json") {
                return Err(Error::invalid_config(
                    format!("pattern '{}' does not select .json files", pattern),
                    "schema descriptors are JSON; end the pattern with .json",
                    src,
                    filename,
                    find_span(src, pattern),
                ));
            }
            if let Err(e) = Pattern::new(pattern) {
                return Err(Error::invalid_config(
                    format!("invalid glob pattern '{}': {}", pattern, e.msg),
                    "see https://docs.rs/glob for the supported syntax",
                    src,
                    filename,
                    find_span(src, pattern),
                ));
            }
        }

        if !self.output.contains(FOLDER) && !self.output.contains(FILE) {
            return Err(Error::invalid_config(
                format!("output '{}' is the same for every file", self.output),
                "use {FOLDER} and/or {FILE} in the output template",
                src,
                filename,
                find_span(src, &self.output),
            ));
        }

        Ok(())
    }

    /// Output path for a descriptor file.
    ///
    /// `{FOLDER}` expands to the file's directory and `{FILE}` to its stem.
    /// A relative template is resolved against `root`.
    pub fn output_path(&self, root: &Path, source: &Path) -> PathBuf {
        let folder = source
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let folder = if folder.is_empty() { ".".to_string() } else { folder };
        let expanded = self
            .output
            .replace(FOLDER, &folder)
            .replace(FILE, &module_stem(source));
        normalize(&root.join(expanded))
    }

    /// Whether a path (absolute, or relative to `root`) is selected by `files`.
    pub fn matches(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        if is_ignored(relative) {
            return false;
        }
        self.files.iter().any(|pattern| {
            Pattern::new(pattern).is_ok_and(|p| p.matches_path_with(relative, MATCH_OPTIONS))
        })
    }

    /// Every descriptor file under `root` selected by `files`, sorted.
    pub fn source_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut found = Vec::new();
        let prefix = Pattern::escape(&root.to_string_lossy());
        for pattern in &self.files {
            let full = if prefix.is_empty() {
                pattern.clone()
            } else {
                format!("{}/{}", prefix.trim_end_matches('/'), pattern)
            };
            let Ok(paths) = glob::glob_with(&full, MATCH_OPTIONS) else {
                continue;
            };
            for path in paths.flatten() {
                let relative = path.strip_prefix(root).unwrap_or(&path);
                if path.is_file() && !is_ignored(relative) {
                    found.push(path);
                }
            }
        }
        found.sort();
        found.dedup();
        found
    }
}

fn is_ignored(relative: &Path) -> bool {
    let mut dirs = relative.components().rev().skip(1);
    dirs.any(|c| match c {
        Component::Normal(name) => {
            let name = name.to_string_lossy();
            name.starts_with('.') || IGNORED_DIRS.contains(&name.as_ref())
        }
        _ => false,
    })
}

/// Resolve `.` and `..` components lexically.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Find the span of a quoted value or key in the configuration source
fn find_span(src: &str, needle: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", needle);
    if let Some(pos) = src.find(&quoted) {
        return Some(SourceSpan::from((pos + 1, needle.len())));
    }
    src.find(needle)
        .map(|pos| SourceSpan::from((pos, needle.len())))
}

/// A configuration together with the file it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub config: Config,
}

impl ConfigFile {
    /// Locate the first configuration file present in `dir`
    pub fn find(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Discover and load the configuration of the project in `dir`
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = Self::find(dir).ok_or_else(|| {
            Box::new(Error::ConfigNotFound {
                dir: dir.to_path_buf(),
            })
        })?;
        Self::from_file(path)
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let config = Config::from_str_with_filename(&content, &path.display().to_string())?;
        Ok(Self { path, config })
    }

    /// Directory that patterns and output templates are relative to
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    pub fn source_files(&self) -> Vec<PathBuf> {
        self.config.source_files(self.root())
    }

    pub fn output_path(&self, source: &Path) -> PathBuf {
        let relative = source.strip_prefix(self.root()).unwrap_or(source);
        self.config.output_path(self.root(), relative)
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.config.matches(self.root(), path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_toml_matches_default_config() {
        let config: Config = DEFAULT_CONFIG_TOML.parse().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_json_config_with_defaults() {
        let config =
            Config::from_str_with_filename(r#"{"output": "py/{FILE}.py"}"#, "zod2py.config.json")
                .unwrap();
        assert_eq!(config.files, default_files());
        assert_eq!(config.output, "py/{FILE}.py");
    }

    #[test]
    fn test_rejects_empty_files() {
        let err = Config::from_str("files = []").unwrap_err();
        match *err {
            Error::InvalidConfig { span, message, .. } => {
                assert_eq!(message, "`files` must contain at least one pattern");
                assert_eq!(span, Some(SourceSpan::from((0, 5))));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_json_pattern() {
        let src = "files = [\"src/**/*.ts\"]";
        let err = Config::from_str(src).unwrap_err();
        match *err {
            Error::InvalidConfig { span, .. } => {
                assert_eq!(span, Some(SourceSpan::from((10, 11))));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_invalid_glob() {
        let err = Config::from_str("files = [\"src/[a.json\"]").unwrap_err();
        assert!(matches!(*err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_rejects_constant_output() {
        let err = Config::from_str("output = \"out.py\"").unwrap_err();
        match *err {
            Error::InvalidConfig { message, .. } => {
                assert_eq!(message, "output 'out.py' is the same for every file");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_toml_syntax_error() {
        let err = Config::from_str("files = [").unwrap_err();
        assert!(matches!(*err, Error::ParseToml { .. }));
    }

    #[test]
    fn test_output_path() {
        let config = Config::default();
        let root = Path::new("/project");
        assert_eq!(
            config.output_path(root, Path::new("src/models/team.z2p.json")),
            PathBuf::from("/project/src/models/z2p/team.py")
        );

        let config = Config {
            output: "generated/{FILE}_types.py".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.output_path(root, Path::new("src/user.z2p.json")),
            PathBuf::from("/project/generated/user_types.py")
        );

        let config = Config {
            output: "{FOLDER}/../py/{FILE}.py".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.output_path(root, Path::new("src/user.z2p.json")),
            PathBuf::from("/project/py/user.py")
        );
    }

    #[test]
    fn test_matches() {
        let config = Config::default();
        let root = Path::new("/project");
        assert!(config.matches(root, Path::new("/project/src/a.z2p.json")));
        assert!(config.matches(root, Path::new("src/nested/deep/b.z2p.json")));
        assert!(!config.matches(root, Path::new("src/a.json")));
        assert!(!config.matches(root, Path::new("lib/a.z2p.json")));
        assert!(!config.matches(root, Path::new("src/.cache/a.z2p.json")));
        assert!(!config.matches(root, Path::new("src/node_modules/a.z2p.json")));
    }

    #[test]
    fn test_source_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        for rel in [
            "src/a.z2p.json",
            "src/models/b.z2p.json",
            "src/node_modules/c.z2p.json",
            "src/other.json",
            "lib/d.z2p.json",
        ] {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "{}").unwrap();
        }

        let found = Config::default().source_files(root);
        let relative: Vec<PathBuf> = found
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            relative,
            [
                PathBuf::from("src/a.z2p.json"),
                PathBuf::from("src/models/b.z2p.json")
            ]
        );
    }

    #[test]
    fn test_discover_order() {
        let temp = TempDir::new().unwrap();
        let err = ConfigFile::discover(temp.path()).unwrap_err();
        assert!(matches!(*err, Error::ConfigNotFound { .. }));

        fs::write(
            temp.path().join(".zod2py.json"),
            r#"{"files": ["schemas/*.json"]}"#,
        )
        .unwrap();
        let found = ConfigFile::discover(temp.path()).unwrap();
        assert_eq!(found.config.files, ["schemas/*.json"]);

        fs::write(temp.path().join(DEFAULT_CONFIG_FILE), DEFAULT_CONFIG_TOML).unwrap();
        let found = ConfigFile::discover(temp.path()).unwrap();
        assert_eq!(found.path, temp.path().join(DEFAULT_CONFIG_FILE));
        assert_eq!(found.config, Config::default());
        assert_eq!(found.root(), temp.path());
    }

    #[test]
    fn test_config_file_output_path_accepts_absolute_source() {
        let file = ConfigFile {
            path: PathBuf::from("/project/zod2py.toml"),
            config: Config::default(),
        };
        assert_eq!(
            file.output_path(Path::new("/project/src/team.z2p.json")),
            PathBuf::from("/project/src/z2p/team.py")
        );
        assert!(file.matches(Path::new("/project/src/team.z2p.json")));
    }
}

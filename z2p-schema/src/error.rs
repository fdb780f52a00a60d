use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for zod2py-schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no configuration found in '{dir}'")]
    #[diagnostic(
        code(zod2py::config_not_found),
        help("create a zod2py.toml, zod2py.config.json or .zod2py.json, or run 'zod2py init'")
    )]
    ConfigNotFound { dir: PathBuf },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(zod2py::parse_error))]
    ParseJson {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid JSON here")]
        span: Option<SourceSpan>,
        filename: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(zod2py::parse_error))]
    ParseToml {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        filename: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid schema node at '{pointer}': {message}")]
    #[diagnostic(
        code(zod2py::invalid_node),
        help("every node is an object with a string `kind`, e.g. {{\"kind\": \"string\"}}")
    )]
    InvalidNode {
        #[source_code]
        src: NamedSource<String>,
        pointer: String,
        message: String,
    },

    #[error("{message}")]
    #[diagnostic(code(zod2py::invalid_config), help("{help}"))]
    InvalidConfig {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
        help: String,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    /// Create a JSON parse error, pointing at the offending line and column
    pub(crate) fn parse_json(source: serde_json::Error, src: &str, filename: &str) -> Box<Self> {
        let span = line_column_offset(src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 0)));
        Box::new(Error::ParseJson {
            src: NamedSource::new(filename, src.to_string()),
            span,
            filename: filename.to_string(),
            source,
        })
    }

    /// Create a TOML parse error from a toml error with source context
    pub(crate) fn parse_toml(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ParseToml {
            src: NamedSource::new(filename, src.to_string()),
            span,
            filename: filename.to_string(),
            source,
        })
    }

    pub(crate) fn invalid_node(
        pointer: impl Into<String>,
        message: impl Into<String>,
        src: &str,
        filename: &str,
    ) -> Box<Self> {
        Box::new(Error::InvalidNode {
            src: NamedSource::new(filename, src.to_string()),
            pointer: pointer.into(),
            message: message.into(),
        })
    }

    pub(crate) fn invalid_config(
        message: impl Into<String>,
        help: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::InvalidConfig {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: message.into(),
            help: help.into(),
        })
    }
}

/// Byte offset of a 1-based line/column position, as reported by serde_json.
fn line_column_offset(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(src.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_column_offset() {
        let src = "{\n  \"a\": 1,\n  oops\n}";
        assert_eq!(line_column_offset(src, 1, 1), Some(0));
        assert_eq!(line_column_offset(src, 3, 3), Some(14));
        assert_eq!(line_column_offset(src, 0, 0), None);
    }

    #[test]
    fn test_parse_json_error_has_span() {
        let src = "{ \"default\": ";
        let source = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        let err = Error::parse_json(source, src, "team.z2p.json");
        match *err {
            Error::ParseJson { span, filename, .. } => {
                assert!(span.is_some());
                assert_eq!(filename, "team.z2p.json");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

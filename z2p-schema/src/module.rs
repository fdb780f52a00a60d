use std::{path::Path, str::FromStr};

use indexmap::IndexMap;
use serde_json::Value;
use zod2py_core::class_name;

use crate::{Error, Result, SchemaNode, parse};

/// The export that, when present, replaces all other exports of a module.
const DEFAULT_EXPORT: &str = "default";

/// A loaded schema descriptor file.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaModule {
    stem: String,
    default: Option<SchemaNode>,
    named: IndexMap<String, SchemaNode>,
}

/// One schema to translate, with the name its declarations are rooted at.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRoot<'a> {
    pub name: String,
    pub node: &'a SchemaNode,
}

/// File name up to its first `.` (`team.z2p.json` -> `team`).
pub fn module_stem(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .unwrap_or_default()
}

impl FromStr for SchemaModule {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "schema.z2p.json")
    }
}

impl SchemaModule {
    /// Load a descriptor file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Load a descriptor from a string; the stem is derived from `filename`
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| Error::parse_json(e, content, filename))?;

        let exports = value.as_object().ok_or_else(|| {
            Error::invalid_node("/", "a module must be an object of exports", content, filename)
        })?;

        let mut default = None;
        let mut named = IndexMap::new();
        for (export, node) in exports {
            let pointer = parse::pointer_push("", export);
            let node = parse::parse_node(node, &pointer)
                .map_err(|e| Error::invalid_node(e.pointer, e.message, content, filename))?;
            if export == DEFAULT_EXPORT {
                default = Some(node);
            } else {
                named.insert(export.clone(), node);
            }
        }

        Ok(Self {
            stem: module_stem(Path::new(filename)),
            default,
            named,
        })
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.named.is_empty()
    }

    /// The schemas to generate, in file order.
    ///
    /// A `default` export shadows every named export and takes the module's
    /// stem as its name.
    pub fn roots(&self) -> Vec<SchemaRoot<'_>> {
        match &self.default {
            Some(node) => vec![SchemaRoot {
                name: class_name(&self.stem),
                node,
            }],
            None => self
                .named
                .iter()
                .map(|(export, node)| SchemaRoot {
                    name: class_name(export),
                    node,
                })
                .collect(),
        }
    }
}

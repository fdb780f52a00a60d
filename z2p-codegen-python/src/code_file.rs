//! Assembly of one generated Python module.

use zod2py_codegen::{CodeBuilder, CodeFragment, Renderable};

use crate::{DataStructure, ImportKey, ImportSet};

const BANNER: &[&str] = &[
    "####################",
    "# Generated by zod2py",
    "# DO NOT MODIFY",
    "####################",
    // Declarations are emitted outer before inner, so annotations must not be
    // evaluated at class creation.
    "from __future__ import annotations",
];

/// `Name: TypeAlias = code`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAlias {
    pub name: String,
    pub code: String,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

impl Renderable for TypeAlias {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(format!(
            "{}: TypeAlias = {}",
            self.name, self.code
        ))]
    }
}

/// A structured Python module: banner, imports, declarations, aliases.
///
/// Top-level blocks are separated by two blank lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PyFile {
    imports: ImportSet,
    structures: Vec<DataStructure>,
    aliases: Vec<TypeAlias>,
}

impl PyFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn imports(mut self, imports: &ImportSet) -> Self {
        self.imports.extend(imports);
        self
    }

    pub fn structures(mut self, structures: impl IntoIterator<Item = DataStructure>) -> Self {
        self.structures.extend(structures);
        self
    }

    /// Add a trailing alias; pulls in the `TypeAlias` import.
    pub fn alias(mut self, alias: TypeAlias) -> Self {
        self.imports.insert(ImportKey::Alias);
        self.aliases.push(alias);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty() && self.aliases.is_empty()
    }

    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::python();

        for line in BANNER {
            builder.push_line(line);
        }
        if !self.imports.is_empty() {
            builder.push_blank();
            builder.emit(&self.imports);
        }

        for structure in &self.structures {
            builder.push_blank().push_blank();
            builder.emit(structure);
        }

        if !self.aliases.is_empty() {
            builder.push_blank().push_blank();
            builder.emit(&self.aliases[..]);
        }

        builder.build()
    }
}

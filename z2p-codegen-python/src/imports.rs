//! Python import statements required by generated code.

use indexmap::IndexSet;
use zod2py_codegen::{CodeFragment, Renderable};

/// Every import a generated unit can need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKey {
    Literal,
    Enumeration,
    Tuple,
    Datetime,
    Dict,
    Optional,
    RecordDeclaration,
    Callable,
    Any,
    Alias,
}

impl ImportKey {
    pub fn statement(&self) -> &'static str {
        match self {
            ImportKey::Literal => "from typing import Literal",
            ImportKey::Enumeration => "from enum import Enum",
            ImportKey::Tuple => "from typing import Tuple",
            ImportKey::Datetime => "from datetime import datetime",
            ImportKey::Dict => "from typing import Dict",
            ImportKey::Optional => "from typing import Optional",
            ImportKey::RecordDeclaration => "from dataclasses import dataclass",
            ImportKey::Callable => "from typing import Callable",
            ImportKey::Any => "from typing import Any",
            ImportKey::Alias => "from typing import TypeAlias",
        }
    }
}

/// Insertion-ordered, deduplicated set of imports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet(IndexSet<ImportKey>);

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import; a key already present keeps its position.
    pub fn insert(&mut self, key: ImportKey) {
        self.0.insert(key);
    }

    pub fn extend(&mut self, other: &ImportSet) {
        self.0.extend(other.iter());
    }

    pub fn contains(&self, key: ImportKey) -> bool {
        self.0.contains(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = ImportKey> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ImportKey> for ImportSet {
    fn from_iter<I: IntoIterator<Item = ImportKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[ImportKey; N]> for ImportSet {
    fn from(keys: [ImportKey; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl Renderable for ImportSet {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.iter()
            .map(|key| CodeFragment::line(key.statement()))
            .collect()
    }
}

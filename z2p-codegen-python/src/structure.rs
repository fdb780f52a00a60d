//! Named declarations emitted alongside type expressions.

use zod2py_codegen::{CodeFragment, Renderable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    /// `@dataclass` class; fields are `name: type`.
    Record,
    /// `Enum` subclass; fields are `name = value`.
    Enumeration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataStructure {
    pub name: String,
    pub kind: StructureKind,
    pub fields: Vec<String>,
}

impl DataStructure {
    pub fn record(name: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind: StructureKind::Record,
            fields,
        }
    }

    pub fn enumeration(name: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind: StructureKind::Enumeration,
            fields,
        }
    }
}

impl Renderable for DataStructure {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let body = if self.fields.is_empty() {
            vec![CodeFragment::line("pass")]
        } else {
            self.fields.iter().map(CodeFragment::line).collect()
        };

        match self.kind {
            StructureKind::Record => vec![
                CodeFragment::line("@dataclass"),
                CodeFragment::block(format!("class {}:", self.name), body),
            ],
            StructureKind::Enumeration => vec![CodeFragment::block(
                format!("class {}(Enum):", self.name),
                body,
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use zod2py_codegen::CodeBuilder;

    use super::*;

    fn render(structure: &DataStructure) -> String {
        let mut builder = CodeBuilder::python();
        builder.emit(structure);
        builder.build()
    }

    #[test]
    fn test_render_record() {
        let record = DataStructure::record("Test", vec!["a: str".into(), "b: float".into()]);
        assert_eq!(render(&record), "@dataclass\nclass Test:\n    a: str\n    b: float\n");
    }

    #[test]
    fn test_render_enumeration() {
        let enumeration = DataStructure::enumeration("Color", vec!["red = \"red\"".into()]);
        assert_eq!(render(&enumeration), "class Color(Enum):\n    red = \"red\"\n");
    }

    #[test]
    fn test_empty_body_is_pass() {
        let record = DataStructure::record("Empty", Vec::new());
        assert_eq!(render(&record), "@dataclass\nclass Empty:\n    pass\n");
    }
}

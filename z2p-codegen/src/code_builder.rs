//! Code builder utility for generating properly indented code.

use crate::{CodeFragment, Renderable};

/// One indentation level (PEP 8).
const INDENT: &str = "    ";

/// Incremental builder for indented code.
///
/// # Example
///
/// ```
/// use zod2py_codegen::{CodeBuilder, CodeFragment};
///
/// let mut builder = CodeBuilder::python();
/// builder.push_line("@dataclass");
/// builder.apply_fragment(CodeFragment::block(
///     "class Point:",
///     vec![CodeFragment::line("x: float")],
/// ));
///
/// assert_eq!(builder.build(), "@dataclass\nclass Point:\n    x: float\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    indent_level: usize,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with 4-space indentation.
    pub fn python() -> Self {
        Self::default()
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Emit a Renderable node.
    pub fn emit<R: Renderable + ?Sized>(&mut self, node: &R) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Apply a single code fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Block { header, body } => {
                self.push_line(&header);
                self.indent_level += 1;
                for f in body {
                    self.apply_fragment(f);
                }
                self.indent_level -= 1;
            }
        }
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }
}

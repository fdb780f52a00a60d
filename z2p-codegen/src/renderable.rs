//! Renderable trait and CodeFragment for decoupled code generation.

/// Represents a fragment of generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line of code (will have newline appended).
    Line(String),
    /// A block: header line followed by an indented body.
    ///
    /// Indentation-delimited languages have no closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
    },
}

impl CodeFragment {
    /// Create a line fragment.
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    /// Create a block fragment.
    pub fn block(header: impl Into<String>, body: Vec<CodeFragment>) -> Self {
        Self::Block {
            header: header.into(),
            body,
        }
    }
}

/// Trait for types that can be rendered to code fragments.
pub trait Renderable {
    /// Convert this node to a sequence of code fragments.
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl<T: Renderable> Renderable for [T] {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.iter().flat_map(Renderable::to_fragments).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_fragment() {
        let block = CodeFragment::block("class A:", vec![CodeFragment::line("pass")]);
        match block {
            CodeFragment::Block { header, body } => {
                assert_eq!(header, "class A:");
                assert_eq!(body, vec![CodeFragment::Line("pass".to_string())]);
            }
            _ => panic!("Expected Block variant"),
        }
    }

    #[test]
    fn test_slice_concatenates_fragments() {
        struct One(&'static str);
        impl Renderable for One {
            fn to_fragments(&self) -> Vec<CodeFragment> {
                vec![CodeFragment::line(self.0)]
            }
        }

        let items = [One("a"), One("b")];
        assert_eq!(
            items[..].to_fragments(),
            vec![CodeFragment::line("a"), CodeFragment::line("b")]
        );
    }
}

//! Schema module to Python module.

use std::path::Path;

use zod2py_codegen::Diagnostic;
use zod2py_core::File;
use zod2py_schema::SchemaModule;

use crate::{PyFile, TranslateContext, TranslateResult, Translator, TypeAlias};

/// What generating a module produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Rendered Python source.
    Code(String),
    /// The module exports nothing; any previous output should go.
    Empty,
    /// A root could not be translated; nothing should be written.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub output: Output,
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedUnit {
    pub fn code(&self) -> Option<&str> {
        match &self.output {
            Output::Code(code) => Some(code),
            _ => None,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// The file to write, if there is code to write.
    pub fn to_file(&self, path: &Path) -> Option<File> {
        self.code().map(|code| File::new(path, code))
    }
}

/// Python generator for schema modules.
///
/// Keeps one translation session for its lifetime, so an unsupported schema
/// kind is reported once no matter how many modules use it.
#[derive(Debug, Default)]
pub struct Generator {
    translator: Translator,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate one Python unit from all roots of `module`.
    pub fn generate(&mut self, module: &SchemaModule) -> GeneratedUnit {
        let roots = module.roots();
        if roots.is_empty() {
            return GeneratedUnit {
                output: Output::Empty,
                diagnostics: self.translator.take_diagnostics(),
            };
        }

        self.translator.begin_unit();
        // Root names go first so exports keep their names when a nested
        // declaration would format to the same identifier.
        let names: Vec<String> = roots
            .iter()
            .map(|root| self.translator.reserve_name(&root.name))
            .collect();

        let mut file = PyFile::new();
        let mut failed = Vec::new();
        for (root, name) in roots.iter().zip(&names) {
            let declares = root.node.declares_name();
            let result = if declares {
                self.translator.translate_declaration(root.node, name)
            } else {
                self.translator
                    .translate(root.node, &TranslateContext::root(name.as_str()))
            };

            match result {
                TranslateResult::Success(t) => {
                    file = file.imports(&t.imports).structures(t.data_structures);
                    if !declares {
                        file = file.alias(TypeAlias::new(name.as_str(), t.code));
                    }
                }
                TranslateResult::Failure => failed.push(name.as_str()),
            }
        }

        let mut diagnostics = self.translator.take_diagnostics();
        let output = if failed.is_empty() {
            Output::Code(file.render())
        } else {
            for name in failed {
                diagnostics.push(
                    Diagnostic::error("generate", format!("could not translate '{}'", name))
                        .at(name),
                );
            }
            Output::Failed
        };

        GeneratedUnit {
            output,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(json: &str) -> GeneratedUnit {
        let module = SchemaModule::from_str_with_filename(json, "models.z2p.json").unwrap();
        Generator::new().generate(&module)
    }

    #[test]
    fn test_empty_module() {
        let unit = generate("{}");
        assert_eq!(unit.output, Output::Empty);
        assert!(unit.diagnostics.is_empty());
    }

    #[test]
    fn test_failed_root_writes_nothing() {
        let unit = generate(
            r#"{
                "ok": {"kind": "string"},
                "broken": {"kind": "tuple", "items": [
                    {"kind": "discriminatedUnion", "discriminator": "t", "options": [{"kind": "string"}]}
                ]}
            }"#,
        );
        assert_eq!(unit.output, Output::Failed);
        assert!(unit.has_errors());
        assert!(unit.to_file(Path::new("out.py")).is_none());

        let error = unit.diagnostics.iter().find(|d| d.severity.is_error()).unwrap();
        assert_eq!(error.message, "could not translate 'Broken'");
    }

    #[test]
    fn test_export_names_win_over_nested_names() {
        let unit = generate(
            r#"{
                "user": {"kind": "object", "shape": {
                    "profile": {"kind": "object", "shape": {"bio": {"kind": "string"}}}
                }},
                "userProfile": {"kind": "array", "element": {"kind": "string"}}
            }"#,
        );
        let code = unit.code().unwrap();
        assert!(code.contains("class User:\n    profile: UserProfileA\n"));
        assert!(code.contains("class UserProfileA:\n"));
        assert!(code.ends_with("UserProfile: TypeAlias = list[str]\n"));
    }

    #[test]
    fn test_large_integer_literal_is_exact() {
        let unit = generate(r#"{"id": {"kind": "literal", "value": 9007199254740993}}"#);
        assert!(
            unit.code()
                .unwrap()
                .ends_with("Id: TypeAlias = Literal[9007199254740993]\n")
        );
    }

    #[test]
    fn test_to_file() {
        let unit = generate(r#"{"default": {"kind": "string"}}"#);
        let file = unit.to_file(Path::new("z2p/models.py")).unwrap();
        assert_eq!(file.path(), Path::new("z2p/models.py"));
        assert!(file.content().ends_with("Models: TypeAlias = str\n"));
    }

    #[test]
    fn test_warnings_once_per_generator() {
        let module = SchemaModule::from_str_with_filename(
            r#"{"default": {"kind": "pipeline"}}"#,
            "a.z2p.json",
        )
        .unwrap();
        let mut generator = Generator::new();
        assert_eq!(generator.generate(&module).diagnostics.len(), 1);
        assert!(generator.generate(&module).diagnostics.is_empty());
    }
}

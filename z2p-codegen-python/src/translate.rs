//! Recursive translation of schema trees into Python type expressions.

use std::collections::HashSet;

use indexmap::IndexMap;
use zod2py_codegen::Diagnostic;
use zod2py_core::{class_name, format_name, join_path, letter_suffix};
use zod2py_schema::SchemaNode;

use crate::{
    DataStructure, ImportKey, ImportSet,
    discriminator::resolve_discriminator,
    encode::{ANY, NONE, encode, naming_fragment, string_literal},
};

const PHASE: &str = "translate";

/// Where in the tree a node sits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslateContext {
    /// Field names from the root, joined with `~`.
    pub path: String,
    /// Explicit name for the declaration this node produces, if any.
    pub name: String,
}

impl TranslateContext {
    pub fn root(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
        }
    }

    /// Path, else name, else `Unnamed`.
    fn base(&self) -> &str {
        if !self.path.is_empty() {
            &self.path
        } else if !self.name.is_empty() {
            &self.name
        } else {
            "Unnamed"
        }
    }

    fn field(&self, field: &str) -> Self {
        Self {
            path: join_path(&self.path, field),
            name: String::new(),
        }
    }

    fn location(&self) -> String {
        self.base().to_string()
    }
}

/// A successfully translated node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Translation {
    /// Python type expression.
    pub code: String,
    pub imports: ImportSet,
    /// Declarations `code` depends on, outer before inner.
    pub data_structures: Vec<DataStructure>,
}

impl Translation {
    fn scalar(code: &str, imports: &[ImportKey]) -> Self {
        Self {
            code: code.to_string(),
            imports: imports.iter().copied().collect(),
            data_structures: Vec::new(),
        }
    }

    fn any() -> Self {
        Self::scalar(ANY, &[ImportKey::Any])
    }

    /// Wrap the expression, keeping imports and declarations.
    fn map_code(mut self, f: impl FnOnce(&str) -> String) -> Self {
        self.code = f(&self.code);
        self
    }

    fn with_import(mut self, key: ImportKey) -> Self {
        self.imports.insert(key);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateResult {
    Success(Translation),
    /// No usable type for this node.
    Failure,
}

impl TranslateResult {
    pub fn is_success(&self) -> bool {
        matches!(self, TranslateResult::Success(_))
    }

    pub fn success(self) -> Option<Translation> {
        match self {
            TranslateResult::Success(t) => Some(t),
            TranslateResult::Failure => None,
        }
    }

    fn map(self, f: impl FnOnce(Translation) -> Translation) -> Self {
        match self {
            TranslateResult::Success(t) => TranslateResult::Success(f(t)),
            TranslateResult::Failure => TranslateResult::Failure,
        }
    }
}

/// Claimed declaration names of one output unit.
#[derive(Debug, Default)]
struct NameRegistry {
    claimed: HashSet<String>,
    /// Claims in order, for [`NameRegistry::rollback`].
    order: Vec<String>,
}

impl NameRegistry {
    /// Claim `name`, or the first free `name` + letter suffix.
    fn claim(&mut self, name: &str) -> String {
        let mut candidate = name.to_string();
        let mut index = 0;
        while self.claimed.contains(&candidate) {
            candidate = format!("{}{}", name, letter_suffix(index));
            index += 1;
        }
        self.claimed.insert(candidate.clone());
        self.order.push(candidate.clone());
        candidate
    }

    fn release(&mut self, name: &str) {
        self.claimed.remove(name);
    }

    fn mark(&self) -> usize {
        self.order.len()
    }

    /// Free every name claimed since `mark`.
    fn rollback(&mut self, mark: usize) {
        for name in self.order.drain(mark..) {
            self.claimed.remove(&name);
        }
    }

    fn clear(&mut self) {
        self.claimed.clear();
        self.order.clear();
    }
}

/// A translation session.
///
/// Declaration names are unique within a unit (between calls to
/// [`Translator::begin_unit`]). Unsupported kinds are reported once per
/// session.
#[derive(Debug, Default)]
pub struct Translator {
    names: NameRegistry,
    warned_kinds: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new output unit: previously claimed names become free again.
    pub fn begin_unit(&mut self) {
        self.names.clear();
    }

    /// Translate `node` as a standalone unit rooted at `name`.
    pub fn translate_root(&mut self, node: &SchemaNode, name: &str) -> TranslateResult {
        self.begin_unit();
        self.translate(node, &TranslateContext::root(name))
    }

    /// Claim a name in the current unit, e.g. for a type alias.
    pub fn reserve_name(&mut self, name: &str) -> String {
        self.names.claim(name)
    }

    /// Translate an object or enum root under a name from [`Translator::reserve_name`].
    ///
    /// The root's own declaration takes exactly that name; nested
    /// declarations still claim theirs as usual.
    pub fn translate_declaration(&mut self, node: &SchemaNode, reserved: &str) -> TranslateResult {
        self.names.release(reserved);
        self.translate(node, &TranslateContext::root(reserved))
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn translate(&mut self, node: &SchemaNode, ctx: &TranslateContext) -> TranslateResult {
        use ImportKey as I;
        use TranslateResult::Success;

        match node {
            SchemaNode::String => Success(Translation::scalar("str", &[])),
            SchemaNode::Number | SchemaNode::BigInt => Success(Translation::scalar("float", &[])),
            SchemaNode::Boolean => Success(Translation::scalar("bool", &[])),
            SchemaNode::Date => Success(Translation::scalar("datetime", &[I::Datetime])),
            SchemaNode::Any
            | SchemaNode::Unknown
            | SchemaNode::Symbol
            | SchemaNode::Promise
            | SchemaNode::Error => Success(Translation::any()),
            SchemaNode::Undefined | SchemaNode::Null | SchemaNode::Never => {
                Success(Translation::scalar(NONE, &[]))
            }
            SchemaNode::Function => Success(Translation::scalar("Callable", &[I::Callable])),

            SchemaNode::Array(element) => self
                .translate(element, ctx)
                .map(|t| t.map_code(|code| format!("list[{}]", code))),
            SchemaNode::Record(value) => Success(
                self.translate_or_any(value, ctx)
                    .map_code(|code| format!("dict[str, {}]", code)),
            ),
            SchemaNode::Nullable(inner) | SchemaNode::Optional(inner) => {
                let mark = self.names.mark();
                Success(match self.translate(inner, ctx) {
                    Success(t) => t
                        .map_code(|code| format!("Optional[{}]", code))
                        .with_import(I::Optional),
                    TranslateResult::Failure => {
                        self.names.rollback(mark);
                        Translation::any()
                    }
                })
            }
            SchemaNode::Branded(inner)
            | SchemaNode::Readonly(inner)
            | SchemaNode::Catch(inner)
            | SchemaNode::Lazy(inner)
            | SchemaNode::Default(inner)
            | SchemaNode::Effects(inner) => Success(self.translate_or_any(inner, ctx)),

            SchemaNode::Literal(value) => {
                let encoded = encode(value);
                Success(if encoded.code == ANY || encoded.code == NONE {
                    Translation {
                        code: encoded.code,
                        imports: encoded.imports,
                        data_structures: Vec::new(),
                    }
                } else {
                    let mut imports = ImportSet::from([I::Literal]);
                    imports.extend(&encoded.imports);
                    Translation {
                        code: format!("Literal[{}]", encoded.code),
                        imports,
                        data_structures: Vec::new(),
                    }
                })
            }
            SchemaNode::Union(options) => Success(self.translate_union(options, ctx)),
            SchemaNode::Tuple(items) => self.translate_tuple(items, ctx),
            SchemaNode::Object(fields) => Success(self.translate_object(fields, ctx)),
            SchemaNode::Enum(members) => {
                let name = self.names.claim(&class_name(ctx.base()));
                let fields = members
                    .iter()
                    .map(|(member, value)| {
                        format!("{} = {}", member, string_literal(value))
                    })
                    .collect();
                Success(Translation {
                    code: name.clone(),
                    imports: ImportSet::from([I::Enumeration]),
                    data_structures: vec![DataStructure::enumeration(name, fields)],
                })
            }
            SchemaNode::DiscriminatedUnion {
                discriminator,
                options,
            } => self.translate_discriminated_union(discriminator, options, ctx),

            SchemaNode::Unrecognized { kind } => {
                if self.warned_kinds.insert(kind.clone()) {
                    self.diagnostics.push(
                        Diagnostic::warning(
                            PHASE,
                            format!("unsupported schema kind '{}', using Any", kind),
                        )
                        .at(ctx.location()),
                    );
                }
                Success(Translation::any())
            }
        }
    }

    /// Translate a child whose failure degrades to `Any`.
    ///
    /// Names claimed by a failed subtree are freed again, so siblings are
    /// named as if the subtree had never been visited.
    fn translate_or_any(&mut self, node: &SchemaNode, ctx: &TranslateContext) -> Translation {
        let mark = self.names.mark();
        match self.translate(node, ctx) {
            TranslateResult::Success(t) => t,
            TranslateResult::Failure => {
                self.names.rollback(mark);
                Translation::any()
            }
        }
    }

    fn translate_union(&mut self, options: &[SchemaNode], ctx: &TranslateContext) -> Translation {
        if options.is_empty() {
            return Translation::any();
        }

        let mut out = Translation::default();
        let mut codes = Vec::with_capacity(options.len());
        let mut any_failed = false;
        for option in options {
            let mark = self.names.mark();
            match self.translate(option, ctx) {
                TranslateResult::Success(t) => {
                    codes.push(t.code);
                    out.imports.extend(&t.imports);
                    out.data_structures.extend(t.data_structures);
                }
                TranslateResult::Failure => {
                    self.names.rollback(mark);
                    codes.push(ANY.to_string());
                    any_failed = true;
                }
            }
        }
        if any_failed {
            out.imports.insert(ImportKey::Any);
        }
        out.code = codes.join(" | ");
        out
    }

    fn translate_tuple(&mut self, items: &[SchemaNode], ctx: &TranslateContext) -> TranslateResult {
        let mut out = Translation::default();
        let mut codes = Vec::with_capacity(items.len());
        for item in items {
            let TranslateResult::Success(t) = self.translate(item, ctx) else {
                return TranslateResult::Failure;
            };
            codes.push(t.code);
            out.imports.extend(&t.imports);
            out.data_structures.extend(t.data_structures);
        }
        out.imports.insert(ImportKey::Tuple);
        out.code = if codes.is_empty() {
            "Tuple[()]".to_string()
        } else {
            format!("Tuple[{}]", codes.join(", "))
        };
        TranslateResult::Success(out)
    }

    fn translate_object(
        &mut self,
        fields: &IndexMap<String, SchemaNode>,
        ctx: &TranslateContext,
    ) -> Translation {
        // Claimed before recursing so the outer declaration keeps the
        // unsuffixed name.
        let name = self.names.claim(&class_name(ctx.base()));

        let mut imports = ImportSet::new();
        let mut nested = Vec::new();
        let mut lines = Vec::with_capacity(fields.len());
        for (field, node) in fields {
            let t = self.translate_or_any(node, &ctx.field(field));
            lines.push(format!("{}: {}", field, t.code));
            imports.extend(&t.imports);
            nested.extend(t.data_structures);
        }
        imports.insert(ImportKey::RecordDeclaration);

        let mut data_structures = vec![DataStructure::record(name.clone(), lines)];
        data_structures.extend(nested);
        Translation {
            code: name,
            imports,
            data_structures,
        }
    }

    fn translate_discriminated_union(
        &mut self,
        discriminator: &str,
        options: &[SchemaNode],
        ctx: &TranslateContext,
    ) -> TranslateResult {
        let base = ctx.base().to_string();
        let mut out = Translation::default();
        out.imports.insert(ImportKey::Literal);
        let mut codes = Vec::with_capacity(options.len());

        for (i, option) in options.iter().enumerate() {
            let SchemaNode::Object(fields) = option.without_passthrough() else {
                self.diagnostics.push(
                    Diagnostic::warning(
                        PHASE,
                        format!(
                            "discriminated union option {} is a '{}', not an object",
                            i,
                            option.without_passthrough().kind()
                        ),
                    )
                    .at(ctx.location()),
                );
                return TranslateResult::Failure;
            };

            let fragment = fields
                .get(discriminator)
                .and_then(resolve_discriminator)
                .map(naming_fragment)
                .map(|fragment| format_name(&fragment))
                .unwrap_or_default();
            let suffix = if fragment.is_empty() {
                format!("{}{}", format_name(discriminator), letter_suffix(i))
            } else {
                fragment
            };
            let branch = format_name(&join_path(&base, &suffix));

            let branch_ctx = TranslateContext {
                path: branch.clone(),
                name: branch,
            };
            let TranslateResult::Success(t) = self.translate(option, &branch_ctx) else {
                return TranslateResult::Failure;
            };
            codes.push(t.code);
            out.imports.extend(&t.imports);
            for structure in t.data_structures {
                if !out.data_structures.iter().any(|s| s.name == structure.name) {
                    out.data_structures.push(structure);
                }
            }
        }

        out.imports.insert(ImportKey::RecordDeclaration);
        out.code = if codes.is_empty() {
            ANY.to_string()
        } else {
            codes.join(" | ")
        };
        if codes.is_empty() {
            out.imports.insert(ImportKey::Any);
        }
        TranslateResult::Success(out)
    }
}

//! The schema tree model.

use indexmap::IndexMap;

/// A scalar value held by a literal schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Null,
    Undefined,
    String(String),
    Number(f64),
    Boolean(bool),
    /// Integer too large for a float to hold exactly.
    BigInt(i128),
    /// A symbol and its description.
    Symbol(Option<String>),
    Function,
    /// Any non-primitive value (arrays, plain objects).
    Object,
}

/// One node of a schema tree.
///
/// The set of kinds is closed; kinds the loader does not know are kept as
/// [`SchemaNode::Unrecognized`] so that translation can degrade them instead
/// of rejecting the whole tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    String,
    Number,
    BigInt,
    Boolean,
    Date,
    Any,
    Unknown,
    Undefined,
    Null,
    Symbol,
    Never,
    Function,
    Error,
    Promise,
    Array(Box<SchemaNode>),
    /// Fields in declaration order.
    Object(IndexMap<String, SchemaNode>),
    Union(Vec<SchemaNode>),
    DiscriminatedUnion {
        discriminator: String,
        options: Vec<SchemaNode>,
    },
    Literal(Primitive),
    /// Member name to member value, in declaration order.
    Enum(IndexMap<String, String>),
    Tuple(Vec<SchemaNode>),
    /// String-keyed map; the node is the value type.
    Record(Box<SchemaNode>),
    Nullable(Box<SchemaNode>),
    Optional(Box<SchemaNode>),
    Branded(Box<SchemaNode>),
    Readonly(Box<SchemaNode>),
    Catch(Box<SchemaNode>),
    Lazy(Box<SchemaNode>),
    /// The node without its default value.
    Default(Box<SchemaNode>),
    /// Refinements and transforms; the node is the inner schema.
    Effects(Box<SchemaNode>),
    Unrecognized {
        kind: String,
    },
}

impl SchemaNode {
    /// The descriptor `kind` tag of this node.
    pub fn kind(&self) -> &str {
        match self {
            SchemaNode::String => "string",
            SchemaNode::Number => "number",
            SchemaNode::BigInt => "bigint",
            SchemaNode::Boolean => "boolean",
            SchemaNode::Date => "date",
            SchemaNode::Any => "any",
            SchemaNode::Unknown => "unknown",
            SchemaNode::Undefined => "undefined",
            SchemaNode::Null => "null",
            SchemaNode::Symbol => "symbol",
            SchemaNode::Never => "never",
            SchemaNode::Function => "function",
            SchemaNode::Error => "error",
            SchemaNode::Promise => "promise",
            SchemaNode::Array(_) => "array",
            SchemaNode::Object(_) => "object",
            SchemaNode::Union(_) => "union",
            SchemaNode::DiscriminatedUnion { .. } => "discriminatedUnion",
            SchemaNode::Literal(_) => "literal",
            SchemaNode::Enum(_) => "enum",
            SchemaNode::Tuple(_) => "tuple",
            SchemaNode::Record(_) => "record",
            SchemaNode::Nullable(_) => "nullable",
            SchemaNode::Optional(_) => "optional",
            SchemaNode::Branded(_) => "branded",
            SchemaNode::Readonly(_) => "readonly",
            SchemaNode::Catch(_) => "catch",
            SchemaNode::Lazy(_) => "lazy",
            SchemaNode::Default(_) => "default",
            SchemaNode::Effects(_) => "effects",
            SchemaNode::Unrecognized { kind } => kind,
        }
    }

    /// Strip modifiers that have no effect on the generated type.
    pub fn without_passthrough(&self) -> &SchemaNode {
        match self {
            SchemaNode::Branded(inner)
            | SchemaNode::Readonly(inner)
            | SchemaNode::Catch(inner)
            | SchemaNode::Lazy(inner)
            | SchemaNode::Default(inner)
            | SchemaNode::Effects(inner) => inner.without_passthrough(),
            other => other,
        }
    }

    /// Whether translating this node as a root declares a type under the
    /// root's own name (objects and enums), so no alias is needed.
    pub fn declares_name(&self) -> bool {
        matches!(
            self.without_passthrough(),
            SchemaNode::Object(_) | SchemaNode::Enum(_)
        )
    }

    pub fn array(element: SchemaNode) -> Self {
        SchemaNode::Array(Box::new(element))
    }

    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, SchemaNode)>) -> Self {
        SchemaNode::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn union(options: impl IntoIterator<Item = SchemaNode>) -> Self {
        SchemaNode::Union(options.into_iter().collect())
    }

    pub fn discriminated_union(
        discriminator: impl Into<String>,
        options: impl IntoIterator<Item = SchemaNode>,
    ) -> Self {
        SchemaNode::DiscriminatedUnion {
            discriminator: discriminator.into(),
            options: options.into_iter().collect(),
        }
    }

    pub fn literal(value: Primitive) -> Self {
        SchemaNode::Literal(value)
    }

    pub fn string_literal(value: impl Into<String>) -> Self {
        SchemaNode::Literal(Primitive::String(value.into()))
    }

    /// An enum whose member names equal their values.
    pub fn enumeration<V: Into<String>>(values: impl IntoIterator<Item = V>) -> Self {
        SchemaNode::Enum(
            values
                .into_iter()
                .map(|v| {
                    let v = v.into();
                    (v.clone(), v)
                })
                .collect(),
        )
    }

    pub fn tuple(items: impl IntoIterator<Item = SchemaNode>) -> Self {
        SchemaNode::Tuple(items.into_iter().collect())
    }

    pub fn record(value: SchemaNode) -> Self {
        SchemaNode::Record(Box::new(value))
    }

    pub fn nullable(inner: SchemaNode) -> Self {
        SchemaNode::Nullable(Box::new(inner))
    }

    pub fn optional(inner: SchemaNode) -> Self {
        SchemaNode::Optional(Box::new(inner))
    }

    pub fn branded(inner: SchemaNode) -> Self {
        SchemaNode::Branded(Box::new(inner))
    }

    pub fn with_default(inner: SchemaNode) -> Self {
        SchemaNode::Default(Box::new(inner))
    }

    pub fn effects(inner: SchemaNode) -> Self {
        SchemaNode::Effects(Box::new(inner))
    }

    pub fn lazy(inner: SchemaNode) -> Self {
        SchemaNode::Lazy(Box::new(inner))
    }

    pub fn unrecognized(kind: impl Into<String>) -> Self {
        SchemaNode::Unrecognized { kind: kind.into() }
    }
}

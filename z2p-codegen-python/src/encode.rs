//! Python literal expressions for scalar values.

use zod2py_core::format_name;
use zod2py_schema::Primitive;

use crate::{ImportKey, ImportSet};

pub(crate) const ANY: &str = "Any";
pub(crate) const NONE: &str = "None";

/// A literal expression and the imports it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub code: String,
    pub imports: ImportSet,
}

impl Encoded {
    fn plain(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            imports: ImportSet::new(),
        }
    }

    fn with_import(code: &str, key: ImportKey) -> Self {
        Self {
            code: code.to_string(),
            imports: ImportSet::from([key]),
        }
    }
}

/// Render a scalar as a Python expression.
pub fn encode(value: &Primitive) -> Encoded {
    match value {
        Primitive::Null | Primitive::Undefined => Encoded::plain(NONE),
        Primitive::String(s) => Encoded::plain(string_literal(s)),
        Primitive::Number(n) => Encoded::plain(number_text(*n)),
        Primitive::Boolean(b) => Encoded::plain(bool_text(*b)),
        Primitive::BigInt(n) => Encoded::plain(n.to_string()),
        Primitive::Function => Encoded::with_import("Callable", ImportKey::Callable),
        Primitive::Symbol(description) => {
            Encoded::plain(string_literal(description.as_deref().unwrap_or_default()))
        }
        Primitive::Object => Encoded::with_import(ANY, ImportKey::Any),
    }
}

/// Double-quoted Python string literal with escapes.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn number_text(n: f64) -> String {
    if n.is_nan() {
        "float(\"nan\")".to_string()
    } else if n == f64::INFINITY {
        "float(\"inf\")".to_string()
    } else if n == f64::NEG_INFINITY {
        "-float(\"inf\")".to_string()
    } else {
        n.to_string()
    }
}

fn bool_text(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

/// Text a discriminator value contributes to a generated class name.
///
/// Empty when the value has nothing usable, in which case the caller falls
/// back to a positional suffix.
pub fn naming_fragment(value: &Primitive) -> String {
    match value {
        Primitive::Null => "null".to_string(),
        Primitive::Undefined => "undefined".to_string(),
        Primitive::String(s) => format_name(s),
        Primitive::Number(n) => number_text(*n).replace('.', ""),
        Primitive::BigInt(n) => n.to_string(),
        Primitive::Boolean(b) => bool_text(*b).to_string(),
        Primitive::Symbol(description) => description.clone().unwrap_or_default(),
        Primitive::Function => "function".to_string(),
        Primitive::Object => "object".to_string(),
    }
}

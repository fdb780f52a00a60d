//! Conversion of JSON descriptors into [`SchemaNode`] trees.
//!
//! Errors carry a JSON pointer (RFC 6901) to the offending node.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::node::{Primitive, SchemaNode};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeError {
    pub pointer: String,
    pub message: String,
}

impl NodeError {
    fn new(pointer: &str, message: impl Into<String>) -> Self {
        Self {
            pointer: if pointer.is_empty() {
                "/".to_string()
            } else {
                pointer.to_string()
            },
            message: message.into(),
        }
    }
}

type NodeResult<T> = std::result::Result<T, NodeError>;

/// Append a reference token to a JSON pointer.
pub(crate) fn pointer_push(pointer: &str, token: &str) -> String {
    format!("{}/{}", pointer, token.replace('~', "~0").replace('/', "~1"))
}

pub(crate) fn parse_node(value: &Value, pointer: &str) -> NodeResult<SchemaNode> {
    let obj = value
        .as_object()
        .ok_or_else(|| NodeError::new(pointer, "expected a schema node object"))?;
    let kind = match obj.get("kind") {
        Some(Value::String(kind)) => kind.as_str(),
        Some(_) => return Err(NodeError::new(pointer, "`kind` must be a string")),
        None => return Err(NodeError::new(pointer, "missing `kind`")),
    };

    let node = match kind {
        "string" => SchemaNode::String,
        "number" => SchemaNode::Number,
        "bigint" => SchemaNode::BigInt,
        "boolean" => SchemaNode::Boolean,
        "date" => SchemaNode::Date,
        "any" => SchemaNode::Any,
        "unknown" => SchemaNode::Unknown,
        "undefined" => SchemaNode::Undefined,
        "null" => SchemaNode::Null,
        "symbol" => SchemaNode::Symbol,
        "never" => SchemaNode::Never,
        "function" => SchemaNode::Function,
        "error" => SchemaNode::Error,
        "promise" => SchemaNode::Promise,
        "array" => SchemaNode::Array(child(obj, "element", pointer)?),
        "object" => SchemaNode::Object(shape(obj, pointer)?),
        "union" => SchemaNode::Union(children(obj, "options", pointer)?),
        "discriminatedUnion" => SchemaNode::DiscriminatedUnion {
            discriminator: string_member(obj, "discriminator", pointer)?,
            options: children(obj, "options", pointer)?,
        },
        "literal" => SchemaNode::Literal(match obj.get("value") {
            Some(value) => parse_primitive(value, &pointer_push(pointer, "value"))?,
            None => Primitive::Undefined,
        }),
        "enum" | "nativeEnum" => SchemaNode::Enum(enum_members(obj, pointer)?),
        "tuple" => SchemaNode::Tuple(children(obj, "items", pointer)?),
        "record" => SchemaNode::Record(child(obj, "value", pointer)?),
        "nullable" => SchemaNode::Nullable(child(obj, "inner", pointer)?),
        "optional" => SchemaNode::Optional(child(obj, "inner", pointer)?),
        "branded" => SchemaNode::Branded(child(obj, "inner", pointer)?),
        "readonly" => SchemaNode::Readonly(child(obj, "inner", pointer)?),
        "catch" => SchemaNode::Catch(child(obj, "inner", pointer)?),
        "lazy" => SchemaNode::Lazy(child(obj, "inner", pointer)?),
        "default" => SchemaNode::Default(child(obj, "inner", pointer)?),
        "effects" => SchemaNode::Effects(child(obj, "inner", pointer)?),
        other => SchemaNode::Unrecognized {
            kind: other.to_string(),
        },
    };
    Ok(node)
}

fn member<'a>(obj: &'a Map<String, Value>, key: &str, pointer: &str) -> NodeResult<&'a Value> {
    obj.get(key)
        .ok_or_else(|| NodeError::new(pointer, format!("missing `{}`", key)))
}

fn child(obj: &Map<String, Value>, key: &str, pointer: &str) -> NodeResult<Box<SchemaNode>> {
    let value = member(obj, key, pointer)?;
    parse_node(value, &pointer_push(pointer, key)).map(Box::new)
}

fn children(obj: &Map<String, Value>, key: &str, pointer: &str) -> NodeResult<Vec<SchemaNode>> {
    let list_pointer = pointer_push(pointer, key);
    member(obj, key, pointer)?
        .as_array()
        .ok_or_else(|| NodeError::new(&list_pointer, "expected an array of schema nodes"))?
        .iter()
        .enumerate()
        .map(|(i, item)| parse_node(item, &pointer_push(&list_pointer, &i.to_string())))
        .collect()
}

fn shape(obj: &Map<String, Value>, pointer: &str) -> NodeResult<IndexMap<String, SchemaNode>> {
    let shape_pointer = pointer_push(pointer, "shape");
    member(obj, "shape", pointer)?
        .as_object()
        .ok_or_else(|| NodeError::new(&shape_pointer, "expected an object of fields"))?
        .iter()
        .map(|(name, field)| {
            let node = parse_node(field, &pointer_push(&shape_pointer, name))?;
            Ok((name.clone(), node))
        })
        .collect()
}

fn string_member(obj: &Map<String, Value>, key: &str, pointer: &str) -> NodeResult<String> {
    member(obj, key, pointer)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| NodeError::new(&pointer_push(pointer, key), "expected a string"))
}

fn enum_members(obj: &Map<String, Value>, pointer: &str) -> NodeResult<IndexMap<String, String>> {
    let values_pointer = pointer_push(pointer, "values");
    match member(obj, "values", pointer)? {
        Value::Array(values) => values
            .iter()
            .enumerate()
            .map(|(i, value)| match value {
                Value::String(s) => Ok((s.clone(), s.clone())),
                _ => Err(NodeError::new(
                    &pointer_push(&values_pointer, &i.to_string()),
                    "enum values must be strings",
                )),
            })
            .collect(),
        Value::Object(members) => members
            .iter()
            .map(|(name, value)| match value {
                Value::String(s) => Ok((name.clone(), s.clone())),
                Value::Number(n) => Ok((name.clone(), n.to_string())),
                _ => Err(NodeError::new(
                    &pointer_push(&values_pointer, name),
                    "enum member values must be strings or numbers",
                )),
            })
            .collect(),
        _ => Err(NodeError::new(
            &values_pointer,
            "expected an array of values or an object of members",
        )),
    }
}

pub(crate) fn parse_primitive(value: &Value, pointer: &str) -> NodeResult<Primitive> {
    Ok(match value {
        Value::Null => Primitive::Null,
        Value::Bool(b) => Primitive::Boolean(*b),
        Value::Number(n) => match number_primitive(n) {
            Some(primitive) => primitive,
            None => return Err(NodeError::new(pointer, "number out of range")),
        },
        Value::String(s) => Primitive::String(s.clone()),
        Value::Array(_) => Primitive::Object,
        Value::Object(obj) => match obj.iter().next() {
            Some((key, inner)) if obj.len() == 1 => match key.as_str() {
                "bigint" => Primitive::BigInt(parse_bigint(inner, &pointer_push(pointer, key))?),
                "symbol" => Primitive::Symbol(inner.as_str().map(str::to_string)),
                "undefined" => Primitive::Undefined,
                "function" => Primitive::Function,
                _ => Primitive::Object,
            },
            _ => Primitive::Object,
        },
    })
}

/// Integers that `f64` cannot hold exactly load as `BigInt`.
fn number_primitive(n: &Number) -> Option<Primitive> {
    match exact_integer(n) {
        Some(i) if (i as f64) as i128 != i => Some(Primitive::BigInt(i)),
        _ => n.as_f64().map(Primitive::Number),
    }
}

fn exact_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn parse_bigint(value: &Value, pointer: &str) -> NodeResult<i128> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<i128>().ok(),
        Value::Number(n) => exact_integer(n),
        _ => None,
    };
    parsed.ok_or_else(|| NodeError::new(pointer, "expected an integer or a decimal string"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: Value) -> NodeResult<SchemaNode> {
        parse_node(&value, "")
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parse(json!({"kind": "string"})), Ok(SchemaNode::String));
        assert_eq!(parse(json!({"kind": "bigint"})), Ok(SchemaNode::BigInt));
        assert_eq!(
            parse(json!({"kind": "promise", "type": {"kind": "string"}})),
            Ok(SchemaNode::Promise)
        );
    }

    #[test]
    fn test_object_keeps_field_order() {
        let node = parse(json!({
            "kind": "object",
            "shape": {
                "zeta": {"kind": "string"},
                "alpha": {"kind": "number"},
                "mid": {"kind": "boolean"}
            }
        }))
        .unwrap();

        let SchemaNode::Object(fields) = node else {
            panic!("expected object");
        };
        let names: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_unknown_kind_is_unrecognized() {
        let node = parse(json!({
            "kind": "object",
            "shape": { "pipe": {"kind": "pipeline", "in": {"kind": "string"}} }
        }))
        .unwrap();

        assert_eq!(
            node,
            SchemaNode::object([("pipe", SchemaNode::unrecognized("pipeline"))])
        );
    }

    #[test]
    fn test_discriminated_union() {
        let node = parse(json!({
            "kind": "discriminatedUnion",
            "discriminator": "type",
            "options": [
                {"kind": "object", "shape": {"type": {"kind": "literal", "value": "a"}}}
            ]
        }))
        .unwrap();

        assert_eq!(
            node,
            SchemaNode::discriminated_union(
                "type",
                [SchemaNode::object([("type", SchemaNode::string_literal("a"))])]
            )
        );
    }

    #[test]
    fn test_literal_values() {
        let literal = |value: Value| parse(json!({"kind": "literal", "value": value}));

        assert_eq!(literal(json!(null)), Ok(SchemaNode::literal(Primitive::Null)));
        assert_eq!(literal(json!(5)), Ok(SchemaNode::literal(Primitive::Number(5.0))));
        assert_eq!(literal(json!(-1.5)), Ok(SchemaNode::literal(Primitive::Number(-1.5))));
        assert_eq!(
            literal(json!({"bigint": "170141183460469231731687303715884105727"})),
            Ok(SchemaNode::literal(Primitive::BigInt(i128::MAX)))
        );
        assert_eq!(
            literal(json!({"symbol": "tag"})),
            Ok(SchemaNode::literal(Primitive::Symbol(Some("tag".into()))))
        );
        assert_eq!(
            literal(json!({"undefined": true})),
            Ok(SchemaNode::literal(Primitive::Undefined))
        );
        assert_eq!(
            literal(json!({"function": true})),
            Ok(SchemaNode::literal(Primitive::Function))
        );
        assert_eq!(
            literal(json!({"a": 1, "b": 2})),
            Ok(SchemaNode::literal(Primitive::Object))
        );
        assert_eq!(
            parse(json!({"kind": "literal"})),
            Ok(SchemaNode::literal(Primitive::Undefined))
        );
    }

    #[test]
    fn test_enum_forms() {
        let from_array = parse(json!({"kind": "enum", "values": ["a", "b"]})).unwrap();
        assert_eq!(from_array, SchemaNode::enumeration(["a", "b"]));

        let from_object =
            parse(json!({"kind": "nativeEnum", "values": {"Low": 1, "High": "high"}})).unwrap();
        let SchemaNode::Enum(members) = from_object else {
            panic!("expected enum");
        };
        assert_eq!(members.get("Low").map(String::as_str), Some("1"));
        assert_eq!(members.get("High").map(String::as_str), Some("high"));
    }

    #[test]
    fn test_errors_carry_pointer() {
        let err = parse(json!({
            "kind": "object",
            "shape": { "a/b": {"kind": "array"} }
        }))
        .unwrap_err();
        assert_eq!(err.pointer, "/shape/a~1b");
        assert_eq!(err.message, "missing `element`");

        let err = parse(json!({"kind": 3})).unwrap_err();
        assert_eq!(err.pointer, "/");

        let err = parse(json!({
            "kind": "tuple",
            "items": [{"kind": "string"}, "number"]
        }))
        .unwrap_err();
        assert_eq!(err.pointer, "/items/1");
    }

    #[test]
    fn test_large_integers_stay_exact() {
        let literal = |value: Value| parse(json!({"kind": "literal", "value": value}));

        assert_eq!(
            literal(json!(9007199254740992u64)),
            Ok(SchemaNode::literal(Primitive::Number(9007199254740992.0)))
        );
        assert_eq!(
            literal(json!(9007199254740993u64)),
            Ok(SchemaNode::literal(Primitive::BigInt(9007199254740993)))
        );
        assert_eq!(
            literal(json!(-9007199254740993i64)),
            Ok(SchemaNode::literal(Primitive::BigInt(-9007199254740993)))
        );
        assert_eq!(
            literal(json!(u64::MAX)),
            Ok(SchemaNode::literal(Primitive::BigInt(u64::MAX as i128)))
        );
        assert_eq!(
            literal(json!({"bigint": 18446744073709551615u64})),
            Ok(SchemaNode::literal(Primitive::BigInt(u64::MAX as i128)))
        );
    }

    #[test]
    fn test_bad_bigint() {
        let err = parse(json!({"kind": "literal", "value": {"bigint": "12x"}})).unwrap_err();
        assert_eq!(err.pointer, "/value/bigint");
    }
}

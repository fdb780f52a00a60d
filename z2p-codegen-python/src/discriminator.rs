use zod2py_schema::{Primitive, SchemaNode};

/// Extract the constant a discriminator field is tagged with.
///
/// Modifiers are unwrapped until a literal, `undefined` or `null` node is
/// reached. Any other node yields `None`.
pub fn resolve_discriminator(node: &SchemaNode) -> Option<&Primitive> {
    const UNDEFINED: &Primitive = &Primitive::Undefined;
    const NULL: &Primitive = &Primitive::Null;

    match node {
        SchemaNode::Literal(value) => Some(value),
        SchemaNode::Undefined => Some(UNDEFINED),
        SchemaNode::Null => Some(NULL),
        SchemaNode::Lazy(inner)
        | SchemaNode::Effects(inner)
        | SchemaNode::Default(inner)
        | SchemaNode::Optional(inner)
        | SchemaNode::Nullable(inner)
        | SchemaNode::Branded(inner)
        | SchemaNode::Readonly(inner)
        | SchemaNode::Catch(inner) => resolve_discriminator(inner),
        _ => None,
    }
}

//! Presentable text for types.
//!
//! Types render the way they are written in a configuration type expression,
//! so the output can be dropped straight into a diagnostic:
//!
//! | type                          | text                         |
//! |-------------------------------|------------------------------|
//! | `Type::list(Type::STRING)`    | `list(string)`               |
//! | `Type::List(None)`            | `list`                       |
//! | `Type::tuple([STRING, BOOL])` | `tuple([string, bool])`      |
//! | object with `a`, `b`          | `object({a=string, b=number})` |
//!
//! Unconstrained positions nested in a tuple or object render as `?`.

use crate::types::{ObjectTy, Type};
use std::fmt;

/// Rendering of an unconstrained nested position.
const UNCONSTRAINED: &str = "?";

impl Type {
    /// Canonical human-readable form of this type.
    pub fn presentable_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(prim) => f.write_str(prim.name()),
            Type::Invalid => f.write_str("invalid"),
            Type::List(element) => format_container(f, "list", element.as_deref()),
            Type::Set(element) => format_container(f, "set", element.as_deref()),
            Type::Map(element) => format_container(f, "map", element.as_deref()),
            Type::Optional(inner) => format_container(f, "optional", inner.as_deref()),
            Type::Tuple(elements) => {
                write!(f, "tuple([")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    format_nested(f, element.as_ref())?;
                }
                write!(f, "])")
            }
            Type::Object(obj) => format_object(f, obj),
        }
    }
}

fn format_container(f: &mut fmt::Formatter<'_>, name: &str, element: Option<&Type>) -> fmt::Result {
    match element {
        Some(element) => write!(f, "{name}({element})"),
        None => f.write_str(name),
    }
}

fn format_nested(f: &mut fmt::Formatter<'_>, ty: Option<&Type>) -> fmt::Result {
    match ty {
        Some(ty) => write!(f, "{ty}"),
        None => f.write_str(UNCONSTRAINED),
    }
}

fn format_object(f: &mut fmt::Formatter<'_>, obj: &ObjectTy) -> fmt::Result {
    let fields = match obj.fields() {
        Some(fields) if !fields.is_empty() => fields,
        _ => return f.write_str("object"),
    };

    write!(f, "object({{")?;
    for (i, (name, ty)) in fields.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{name}=")?;
        format_nested(f, ty.as_ref())?;
    }
    write!(f, "}})")
}

//! The convertibility relation.
//!
//! `is_convertible(source, target)` answers whether a value of `source` may be
//! used where `target` is expected. The rules follow the known-conversion
//! table of the configuration language's value model:
//!
//! 1. identical types convert
//! 2. everything converts to `any`
//! 3. `optional(T)` accepts whatever `T` accepts
//! 4. scalars: `string` <-> `number`, `string` <-> `bool`, and `null`/`any`
//!    convert to anything
//! 5. structural rules for objects, maps, tuples, lists and sets
//!
//! Unconstrained (`None`) element or field types are permissive on either side.
//! The relation is total and never panics.

use crate::error::{Result, TypeError};
use crate::types::{ObjectTy, PrimTy, Type};
use hclty_log::debug;

impl Type {
    /// Whether a value of this type may be used where `target` is expected.
    ///
    /// ```
    /// use hclty_types::Type;
    ///
    /// assert!(Type::STRING.is_convertible_to(&Type::NUMBER));
    /// assert!(!Type::OBJECT.is_convertible_to(&Type::ARRAY));
    /// ```
    pub fn is_convertible_to(&self, target: &Type) -> bool {
        is_convertible(self, target)
    }
}

/// Whether a value of `source` may be used where `target` is expected.
pub fn is_convertible(source: &Type, target: &Type) -> bool {
    if source == target || target.is_any() {
        return true;
    }

    if let Type::Optional(inner) = target {
        let Some(inner) = inner.as_deref() else {
            return true;
        };
        return match source {
            Type::Optional(Some(source_inner)) => is_convertible(source_inner, inner),
            Type::Optional(None) => true,
            _ => is_convertible(source, inner),
        };
    }

    match source {
        Type::Primitive(prim) => primitive_convertible(*prim, target),
        Type::Invalid => false,
        Type::Object(obj) => object_convertible(obj, target),
        Type::Map(element) => map_convertible(element.as_deref(), target),
        Type::Tuple(elements) => tuple_convertible(elements, target),
        Type::List(element) | Type::Set(element) => match target {
            Type::List(target_element) | Type::Set(target_element) => {
                elements_convertible(element.as_deref(), target_element.as_deref())
            }
            _ => false,
        },
        Type::Optional(_) => false,
    }
}

/// Like [`is_convertible`], reporting a negative answer as an error.
///
/// # Errors
///
/// Returns [`TypeError::NotConvertible`] exactly when `is_convertible` is false.
pub fn ensure_convertible(from: &Type, to: &Type) -> Result<()> {
    if is_convertible(from, to) {
        return Ok(());
    }
    debug!("{} is not convertible to {}", from, to);
    Err(TypeError::NotConvertible {
        from: from.clone(),
        to: to.clone(),
    })
}

/// Element-wise check where an unconstrained side always matches.
fn elements_convertible(from: Option<&Type>, to: Option<&Type>) -> bool {
    match (from, to) {
        (Some(from), Some(to)) => is_convertible(from, to),
        _ => true,
    }
}

fn primitive_convertible(prim: PrimTy, target: &Type) -> bool {
    match prim {
        PrimTy::String => matches!(
            target,
            Type::Primitive(PrimTy::Number | PrimTy::Bool)
        ),
        PrimTy::Number | PrimTy::Bool => matches!(target, Type::Primitive(PrimTy::String)),
        PrimTy::Null | PrimTy::Any => true,
    }
}

fn object_convertible(obj: &ObjectTy, target: &Type) -> bool {
    match target {
        Type::Map(element) => {
            let (Some(fields), Some(element)) = (obj.fields(), element.as_deref()) else {
                return true;
            };
            if fields.is_empty() {
                return true;
            }
            // Every constrained attribute must share one type.
            let mut values = fields.values().flatten();
            let Some(first) = values.next() else {
                return false;
            };
            values.all(|ty| ty == first) && is_convertible(first, element)
        }
        Type::Object(target_obj) => object_to_object(obj, target_obj),
        _ => false,
    }
}

/// The target may declare fewer fields than the source; every required target
/// field must be present in the source.
fn object_to_object(source: &ObjectTy, target: &ObjectTy) -> bool {
    let (Some(source_fields), Some(target_fields)) = (source.fields(), target.fields()) else {
        return true;
    };

    let missing_required = target_fields
        .keys()
        .filter(|name| !target.is_optional_field(name))
        .any(|name| !source_fields.contains_key(name));
    if missing_required {
        return false;
    }

    // Only `optional(...)` wrapped source fields are exempt; a name listed in
    // the source's optional set still has its type checked.
    source_fields.iter().all(|(name, ty)| match (ty, target_fields.get(name)) {
        (Some(Type::Optional(_)), _) => true,
        (Some(ty), Some(Some(target_ty))) => is_convertible(ty, target_ty),
        _ => true,
    })
}

fn map_convertible(element: Option<&Type>, target: &Type) -> bool {
    match target {
        Type::Map(target_element) => elements_convertible(element, target_element.as_deref()),
        Type::Object(target_obj) => {
            let (Some(element), Some(fields)) = (element, target_obj.fields()) else {
                return true;
            };
            fields.values().flatten().all(|ty| is_convertible(element, ty))
        }
        _ => false,
    }
}

/// Unknown tuple positions are skipped rather than failed.
fn tuple_convertible(elements: &[Option<Type>], target: &Type) -> bool {
    match target {
        Type::Tuple(target_elements) => {
            elements.len() == target_elements.len()
                && elements
                    .iter()
                    .zip(target_elements)
                    .all(|(from, to)| elements_convertible(from.as_ref(), to.as_ref()))
        }
        Type::List(element) | Type::Set(element) => match element.as_deref() {
            None => true,
            Some(element) => elements.iter().flatten().all(|ty| is_convertible(ty, element)),
        },
        _ => false,
    }
}

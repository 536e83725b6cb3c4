//! Common-supertype computation.
//!
//! Given several types, find the most specific type that every one of them can
//! be treated as. This is what literal collections (`[1, "a"]`), variable
//! declarations with defaults and polymorphic built-in functions use to merge
//! heterogeneous inputs.
//!
//! The answer is `None` when no common type exists. That is deliberately not
//! `any`: a caller that wants "no constraint" has to ask for it.

use crate::error::{Result, TypeError};
use crate::types::{ObjectTy, Type};
use hashbrown::HashSet;
use hclty_log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet};

/// Most specific type every input can be treated as.
///
/// `None` entries stand for unconstrained types. Any such entry makes the
/// result `None`, since an unknown type never unifies to something concrete.
///
/// ```
/// use hclty_types::{infer::common_supertype, Type};
///
/// assert_eq!(
///     common_supertype(&[Some(Type::STRING), Some(Type::NUMBER)]),
///     Some(Type::NUMBER)
/// );
/// assert_eq!(common_supertype(&[Some(Type::STRING), None]), None);
/// assert_eq!(common_supertype(&[]), None);
/// ```
pub fn common_supertype(types: &[Option<Type>]) -> Option<Type> {
    join(types.iter().map(Option::as_ref).collect())
}

/// [`common_supertype`] over fully known types.
pub fn common_supertype_of<'a>(types: impl IntoIterator<Item = &'a Type>) -> Option<Type> {
    join(types.into_iter().map(Some).collect())
}

/// Like [`common_supertype`], reporting a missing answer as an error.
///
/// # Errors
///
/// Returns [`TypeError::NoCommonType`] exactly when `common_supertype` returns
/// `None`.
pub fn require_common_supertype(types: &[Option<Type>]) -> Result<Type> {
    common_supertype(types).ok_or_else(|| {
        debug!("no common type for {} inputs", types.len());
        TypeError::NoCommonType {
            types: types.to_vec(),
        }
    })
}

fn join(input: Vec<Option<&Type>>) -> Option<Type> {
    if input.is_empty() {
        return None;
    }

    let mut known = Vec::with_capacity(input.len());
    for ty in input {
        known.push(ty?);
    }
    if known.iter().any(|ty| ty.is_any()) {
        return Some(Type::ANY);
    }

    let mut seen = HashSet::with_capacity(known.len());
    let distinct: Vec<&Type> = known.into_iter().filter(|ty| seen.insert(*ty)).collect();
    if let [single] = distinct.as_slice() {
        return Some((*single).clone());
    }

    trace!("joining {} distinct types", distinct.len());

    if let Some(ty) = join_with_string(&distinct) {
        return Some(ty);
    }

    if distinct.iter().all(|ty| ty.is_list_like()) {
        trace!("joining as list");
        return Some(join_sequences(&distinct));
    }

    if distinct.iter().all(|ty| matches!(ty, Type::Object(_))) {
        trace!("joining as object");
        return Some(join_objects(&distinct));
    }

    if distinct.iter().all(|ty| ty.is_object_like()) {
        trace!("joining as map");
        return Some(join_maps(&distinct));
    }

    if distinct.iter().any(|ty| matches!(ty, Type::Optional(_))) {
        trace!("retrying without optional wrappers");
        let unwrapped = distinct
            .iter()
            .map(|ty| match ty {
                Type::Optional(inner) => inner.as_deref(),
                other => Some(*other),
            })
            .collect();
        return join(unwrapped);
    }

    None
}

/// `string` coerces to and from the other scalars, so a set containing it
/// collapses to whichever side both can reach.
fn join_with_string(distinct: &[&Type]) -> Option<Type> {
    if !distinct.contains(&&Type::STRING) {
        return None;
    }

    if let [a, b] = distinct {
        let other = if **a == Type::STRING { *b } else { *a };
        if Type::STRING.is_convertible_to(other) {
            return Some(other.clone());
        }
    }

    distinct
        .iter()
        .all(|ty| ty.is_convertible_to(&Type::STRING))
        .then_some(Type::STRING)
}

fn join_sequences(distinct: &[&Type]) -> Type {
    let mut elements: Vec<Type> = Vec::with_capacity(distinct.len());
    for ty in distinct {
        let element = match ty {
            Type::List(element) | Type::Set(element) => {
                element.as_deref().cloned().unwrap_or(Type::ANY)
            }
            Type::Tuple(items) => {
                join(items.iter().map(Option::as_ref).collect()).unwrap_or(Type::ANY)
            }
            _ => continue,
        };
        elements.push(element);
    }

    Type::list(common_supertype_of(&elements).unwrap_or(Type::ANY))
}

/// Fields are joined per name across the objects that declare them; an object
/// lacking a field contributes nothing to it.
fn join_objects(distinct: &[&Type]) -> Type {
    let mut by_name: BTreeMap<&str, Vec<Option<&Type>>> = BTreeMap::new();
    for ty in distinct {
        let Type::Object(obj) = ty else { continue };
        let Some(fields) = obj.fields() else { continue };
        for (name, field) in fields {
            by_name.entry(name.as_str()).or_default().push(field.as_ref());
        }
    }

    let fields = by_name
        .into_iter()
        .map(|(name, types)| (name.to_string(), join(types)))
        .collect();
    Type::Object(ObjectTy::new(Some(fields), BTreeSet::new()))
}

fn join_maps(distinct: &[&Type]) -> Type {
    let any = Type::ANY;
    let mut values: Vec<&Type> = Vec::new();
    for ty in distinct {
        match ty {
            Type::Map(element) => values.push(element.as_deref().unwrap_or(&any)),
            Type::Object(obj) => {
                if let Some(fields) = obj.fields() {
                    values.extend(fields.values().flatten());
                }
            }
            _ => {}
        }
    }

    Type::map(common_supertype_of(values).unwrap_or(Type::ANY))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sup(types: &[Type]) -> Option<Type> {
        common_supertype_of(types)
    }

    #[test]
    fn test_empty_and_unknown() {
        assert_eq!(common_supertype(&[]), None);
        assert_eq!(common_supertype(&[None]), None);
        assert_eq!(common_supertype(&[Some(Type::STRING), None]), None);
        assert_eq!(common_supertype(&[None, Some(Type::ANY)]), None);
        assert_eq!(common_supertype(&[Some(Type::ANY), None]), None);
    }

    #[test]
    fn test_any_short_circuits() {
        assert_eq!(sup(&[Type::OBJECT, Type::ANY]), Some(Type::ANY));
        assert_eq!(sup(&[Type::ANY, Type::INVALID]), Some(Type::ANY));
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(sup(&[Type::BOOL]), Some(Type::BOOL));
        assert_eq!(sup(&[Type::BOOL, Type::BOOL]), Some(Type::BOOL));
        assert_eq!(sup(&[Type::INVALID, Type::INVALID]), Some(Type::INVALID));
    }

    #[test]
    fn test_string_pairs() {
        assert_eq!(sup(&[Type::STRING, Type::NUMBER]), Some(Type::NUMBER));
        assert_eq!(sup(&[Type::BOOL, Type::STRING]), Some(Type::BOOL));
        assert_eq!(sup(&[Type::STRING, Type::NULL]), Some(Type::STRING));
    }

    #[test]
    fn test_string_absorbs_scalars() {
        assert_eq!(
            sup(&[Type::STRING, Type::NUMBER, Type::BOOL]),
            Some(Type::STRING)
        );
        assert_eq!(
            sup(&[Type::STRING, Type::NUMBER, Type::NULL]),
            Some(Type::STRING)
        );
    }

    #[test]
    fn test_scalars_without_string_do_not_join() {
        assert_eq!(sup(&[Type::NUMBER, Type::BOOL]), None);
        assert_eq!(sup(&[Type::NUMBER, Type::NULL]), None);
    }

    #[test]
    fn test_invalid_does_not_join() {
        assert_eq!(sup(&[Type::STRING, Type::INVALID]), None);
        assert_eq!(sup(&[Type::NUMBER, Type::INVALID]), None);
    }

    #[test]
    fn test_sequences_become_lists() {
        assert_eq!(
            sup(&[Type::list(Type::STRING), Type::set(Type::NUMBER)]),
            Some(Type::list(Type::NUMBER))
        );
        assert_eq!(
            sup(&[Type::list(Type::STRING), Type::tuple([Type::STRING, Type::BOOL])]),
            Some(Type::list(Type::BOOL))
        );
        assert_eq!(
            sup(&[Type::set(Type::BOOL), Type::set(Type::BOOL), Type::list(Type::BOOL)]),
            Some(Type::list(Type::BOOL))
        );
    }

    #[test]
    fn test_sequences_default_to_any() {
        assert_eq!(
            sup(&[Type::ARRAY, Type::list(Type::STRING)]),
            Some(Type::list(Type::ANY))
        );
        assert_eq!(
            sup(&[Type::list(Type::NUMBER), Type::list(Type::BOOL)]),
            Some(Type::list(Type::ANY))
        );
        assert_eq!(
            sup(&[Type::Tuple(vec![]), Type::list(Type::STRING)]),
            Some(Type::list(Type::ANY))
        );
    }

    #[test]
    fn test_objects_merge_per_field() {
        let a = Type::object([("a", Type::STRING)]);
        let b = Type::object([("a", Type::NUMBER), ("b", Type::BOOL)]);
        assert_eq!(
            sup(&[a, b]),
            Some(Type::object([("a", Type::NUMBER), ("b", Type::BOOL)]))
        );
    }

    #[test]
    fn test_object_field_without_common_type_is_unconstrained() {
        let a = Type::object([("a", Type::NUMBER)]);
        let b = Type::object([("a", Type::BOOL), ("c", Type::STRING)]);

        let merged = sup(&[a, b]).unwrap();
        let Type::Object(obj) = &merged else {
            panic!("expected object, got {merged}");
        };
        assert_eq!(obj.field("a"), Some(None));
        assert_eq!(obj.field("c"), Some(Some(&Type::STRING)));
        assert_eq!(merged.to_string(), "object({a=?, c=string})");
    }

    #[test]
    fn test_unconstrained_object_contributes_no_fields() {
        let a = Type::object([("id", Type::NUMBER)]);
        assert_eq!(
            sup(&[Type::OBJECT, a.clone()]),
            Some(Type::object([("id", Type::NUMBER)]))
        );
        let merged = sup(&[Type::OBJECT, Type::object([("x", Type::BOOL)]), a]);
        assert_eq!(
            merged,
            Some(Type::object([("id", Type::NUMBER), ("x", Type::BOOL)]))
        );
    }

    #[test]
    fn test_object_merge_drops_optional_names() {
        let a = Type::object_with_optional([("a", Type::STRING)], ["a"]);
        let b = Type::object([("a", Type::NUMBER)]);
        let merged = sup(&[a, b]).unwrap();
        let Type::Object(obj) = merged else {
            panic!("expected object");
        };
        assert!(obj.optional_fields().is_empty());
        assert_eq!(obj, ObjectTy::new(
            Some([("a".to_string(), Some(Type::NUMBER))].into_iter().collect()),
            Default::default(),
        ));
    }

    #[test]
    fn test_maps_and_objects_become_maps() {
        assert_eq!(
            sup(&[
                Type::map(Type::STRING),
                Type::object([("a", Type::NUMBER), ("b", Type::STRING)]),
            ]),
            Some(Type::map(Type::NUMBER))
        );
        assert_eq!(
            sup(&[Type::map(Type::STRING), Type::map(Type::BOOL)]),
            Some(Type::map(Type::BOOL))
        );
        assert_eq!(
            sup(&[Type::Map(None), Type::map(Type::BOOL)]),
            Some(Type::map(Type::ANY))
        );
        assert_eq!(
            sup(&[Type::map(Type::NUMBER), Type::OBJECT]),
            Some(Type::map(Type::NUMBER))
        );
    }

    #[test]
    fn test_optionals_are_unwrapped() {
        assert_eq!(
            sup(&[Type::optional(Type::STRING), Type::NUMBER]),
            Some(Type::NUMBER)
        );
        assert_eq!(
            sup(&[Type::optional(Type::STRING), Type::optional(Type::BOOL)]),
            Some(Type::BOOL)
        );
        assert_eq!(sup(&[Type::Optional(None), Type::NUMBER]), None);
    }

    #[test]
    fn test_no_common_type() {
        assert_eq!(sup(&[Type::STRING, Type::object([("a", Type::STRING)])]), None);
        assert_eq!(sup(&[Type::list(Type::STRING), Type::map(Type::STRING)]), None);
        assert_eq!(sup(&[Type::NUMBER, Type::list(Type::NUMBER)]), None);
    }

    #[test]
    fn test_require_common_supertype() {
        assert_eq!(
            require_common_supertype(&[Some(Type::NUMBER), Some(Type::STRING)]),
            Ok(Type::NUMBER)
        );
        assert_eq!(
            require_common_supertype(&[Some(Type::NUMBER), None]),
            Err(TypeError::NoCommonType {
                types: vec![Some(Type::NUMBER), None],
            })
        );
    }
}

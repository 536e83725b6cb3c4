//! Core type representation.
//!
//! `Type` is a closed sum of the type constructors a configuration value can
//! have. Values are immutable trees built bottom-up; equality and hashing are
//! purely structural.
//!
//! # Unconstrained positions
//!
//! Every place a constructor holds a nested type uses `Option`:
//!
//! - `None` means **unconstrained**: any type is acceptable there
//! - `Some(Type::NULL)` is the type of the literal `null`
//! - `Some(Type::INVALID)` marks a type that could not be determined
//!
//! The three must never be conflated.

use std::collections::{BTreeMap, BTreeSet};

/// A structural configuration type.
///
/// # Example
///
/// ```
/// use hclty_types::Type;
///
/// let tags = Type::map(Type::STRING);
/// let ports = Type::tuple([Type::NUMBER, Type::NUMBER]);
///
/// assert!(tags.is_object_like());
/// assert!(ports.is_list_like());
/// assert_eq!(Type::list(Type::BOOL), Type::list(Type::BOOL));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Built-in scalar: `string`, `number`, `bool`, `null`, `any`.
    Primitive(PrimTy),

    /// Sentinel for a type that could not be determined because of an
    /// upstream source error.
    ///
    /// Unlike `any` it absorbs nothing. As a source it converts only to
    /// itself, to `any`, and to `optional`, `optional(any)` or
    /// `optional(invalid)`. It only unifies with itself.
    Invalid,

    /// Ordered homogeneous sequence, e.g. `list(number)`.
    List(Option<Box<Type>>),

    /// Unordered collection of unique values, e.g. `set(string)`.
    Set(Option<Box<Type>>),

    /// String-keyed homogeneous collection, e.g. `map(bool)`.
    Map(Option<Box<Type>>),

    /// Fixed-length sequence where each position has its own type.
    Tuple(Vec<Option<Type>>),

    /// Named heterogeneous record. Extra fields on values are tolerated.
    Object(ObjectTy),

    /// Marks an object field as not required.
    Optional(Option<Box<Type>>),
}

/// Scalar types built into the configuration language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimTy {
    /// `string`
    String,
    /// `number`
    Number,
    /// `bool`
    Bool,
    /// `null`, the type of the null literal
    Null,
    /// `any`, the universal top type
    Any,
}

impl PrimTy {
    /// Keyword used for this primitive in type expressions.
    pub const fn name(self) -> &'static str {
        match self {
            PrimTy::String => "string",
            PrimTy::Number => "number",
            PrimTy::Bool => "bool",
            PrimTy::Null => "null",
            PrimTy::Any => "any",
        }
    }
}

/// Payload of [`Type::Object`].
///
/// `fields == None` is the unconstrained object `object`, which accepts any
/// attributes. Field names are kept sorted so rendering and hashing are
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectTy {
    fields: Option<BTreeMap<String, Option<Type>>>,
    optional: BTreeSet<String>,
}

impl ObjectTy {
    /// The object with no field information.
    pub const UNCONSTRAINED: ObjectTy = ObjectTy {
        fields: None,
        optional: BTreeSet::new(),
    };

    /// Builds an object payload from raw parts.
    pub fn new(
        fields: Option<BTreeMap<String, Option<Type>>>,
        optional: BTreeSet<String>,
    ) -> Self {
        Self { fields, optional }
    }

    /// Declared fields, or `None` when the object is unconstrained.
    pub fn fields(&self) -> Option<&BTreeMap<String, Option<Type>>> {
        self.fields.as_ref()
    }

    /// Type declared for `name`.
    ///
    /// The outer `Option` is `None` when the field is not declared (or the
    /// object is unconstrained); the inner one is `None` when the field is
    /// declared without a type constraint.
    pub fn field(&self, name: &str) -> Option<Option<&Type>> {
        self.fields
            .as_ref()
            .and_then(|fields| fields.get(name))
            .map(Option::as_ref)
    }

    /// Names listed as optional alongside the field map.
    pub fn optional_fields(&self) -> &BTreeSet<String> {
        &self.optional
    }

    /// Whether `name` is optional, either by being listed in the optional set
    /// or by having an `optional(...)` wrapped type.
    pub fn is_optional_field(&self, name: &str) -> bool {
        self.optional.contains(name)
            || matches!(self.field(name), Some(Some(Type::Optional(_))))
    }

    /// Whether the object declares no field information at all.
    pub fn is_unconstrained(&self) -> bool {
        self.fields.is_none()
    }
}

impl Type {
    /// `string`
    pub const STRING: Type = Type::Primitive(PrimTy::String);
    /// `number`
    pub const NUMBER: Type = Type::Primitive(PrimTy::Number);
    /// `bool`
    pub const BOOL: Type = Type::Primitive(PrimTy::Bool);
    /// `null`
    pub const NULL: Type = Type::Primitive(PrimTy::Null);
    /// `any`
    pub const ANY: Type = Type::Primitive(PrimTy::Any);
    /// Error sentinel.
    pub const INVALID: Type = Type::Invalid;
    /// A list of anything, as used by schema attributes with no element type.
    pub const ARRAY: Type = Type::List(None);
    /// An object with no field information.
    pub const OBJECT: Type = Type::Object(ObjectTy::UNCONSTRAINED);

    /// `list(element)`
    pub fn list(element: Type) -> Type {
        Type::List(Some(Box::new(element)))
    }

    /// `set(element)`
    pub fn set(element: Type) -> Type {
        Type::Set(Some(Box::new(element)))
    }

    /// `map(element)`
    pub fn map(element: Type) -> Type {
        Type::Map(Some(Box::new(element)))
    }

    /// `optional(inner)`
    pub fn optional(inner: Type) -> Type {
        Type::Optional(Some(Box::new(inner)))
    }

    /// Tuple whose positions are all constrained.
    pub fn tuple(elements: impl IntoIterator<Item = Type>) -> Type {
        Type::Tuple(elements.into_iter().map(Some).collect())
    }

    /// Object whose fields are all constrained and required.
    ///
    /// ```
    /// use hclty_types::Type;
    ///
    /// let person = Type::object([("name", Type::STRING), ("age", Type::NUMBER)]);
    /// assert_eq!(person.to_string(), "object({age=number, name=string})");
    /// ```
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Type)>) -> Type {
        Type::object_with_optional(fields, std::iter::empty::<String>())
    }

    /// Object with an explicit set of optional field names.
    pub fn object_with_optional<K, N>(
        fields: impl IntoIterator<Item = (K, Type)>,
        optional: impl IntoIterator<Item = N>,
    ) -> Type
    where
        K: Into<String>,
        N: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, ty)| (name.into(), Some(ty)))
            .collect();
        let optional = optional.into_iter().map(Into::into).collect();
        Type::Object(ObjectTy::new(Some(fields), optional))
    }

    /// True for `list`, `set` and `tuple`.
    pub fn is_list_like(&self) -> bool {
        matches!(self, Type::List(_) | Type::Set(_) | Type::Tuple(_))
    }

    /// True for `map` and `object`.
    pub fn is_object_like(&self) -> bool {
        matches!(self, Type::Map(_) | Type::Object(_))
    }

    /// True for the top type `any`.
    pub fn is_any(&self) -> bool {
        matches!(self, Type::Primitive(PrimTy::Any))
    }

    /// True for the scalar value types `string`, `number` and `bool`.
    pub fn is_simple_value(&self) -> bool {
        matches!(
            self,
            Type::Primitive(PrimTy::String | PrimTy::Number | PrimTy::Bool)
        )
    }

    /// True for the error sentinel.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Type::Invalid)
    }
}

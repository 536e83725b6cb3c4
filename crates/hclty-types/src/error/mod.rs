//! Errors for callers that turn algebra answers into diagnostics.
//!
//! The relations in [`crate::check`] and [`crate::infer`] are total and never
//! fail. The `Result`-returning wrappers next to them report a negative answer
//! as a [`TypeError`] carrying the types involved.

use crate::types::Type;
use std::fmt;

/// A negative answer from the type algebra.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// A value of `from` cannot be used where `to` is expected.
    NotConvertible {
        /// The provided type
        from: Type,
        /// The expected type
        to: Type,
    },

    /// No common supertype exists for a group of types.
    NoCommonType {
        /// The inputs, `None` standing for an unconstrained type
        types: Vec<Option<Type>>,
    },
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::NotConvertible { from, to } => {
                write!(f, "cannot convert {from} to {to}")
            }
            TypeError::NoCommonType { types } => {
                write!(f, "no common type for [")?;
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match ty {
                        Some(ty) => write!(f, "{ty}")?,
                        None => write!(f, "?")?,
                    }
                }
                write!(f, "]")
            }
        }
    }
}

impl std::error::Error for TypeError {}

/// Result alias used by the diagnostic wrappers.
pub type Result<T> = std::result::Result<T, TypeError>;

//! `hclty` type algebra for HCL/Terraform configuration values.
//!
//! This crate answers two questions about the structural types that
//! configuration values can have:
//!
//! - **Convertibility**: may a value of one type be used where another is
//!   expected? See [`check::is_convertible`].
//! - **Unification**: what is the most specific type a group of types can all
//!   be treated as? See [`infer::common_supertype`].
//!
//! Both relations are pure functions over immutable [`Type`] trees. An
//! unconstrained element or field is modelled as `None`, which is distinct from
//! the `null` primitive ([`Type::NULL`]) and from the error sentinel
//! ([`Type::INVALID`]).
//!
//! # Example
//!
//! ```
//! use hclty_types::{infer::common_supertype, Type};
//!
//! let merged = common_supertype(&[
//!     Some(Type::list(Type::STRING)),
//!     Some(Type::list(Type::NUMBER)),
//! ]);
//! assert_eq!(merged, Some(Type::list(Type::NUMBER)));
//! assert!(Type::NUMBER.is_convertible_to(&Type::STRING));
//! ```

#![warn(missing_docs)]

pub mod check;
pub mod error;
pub mod infer;
pub mod types;

pub use error::{Result, TypeError};
pub use types::{ObjectTy, PrimTy, Type};

//! Type representation.
//!
//! - **ty**: the `Type` sum, its constants, constructors and classification
//!   predicates
//! - **display**: presentable text used in diagnostics

pub mod display;
pub mod ty;

pub use ty::{ObjectTy, PrimTy, Type};

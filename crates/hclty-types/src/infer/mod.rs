//! Type inference over groups of types.
//!
//! - **supertype**: the common-supertype (unification) algorithm

pub mod supertype;

pub use supertype::{common_supertype, common_supertype_of, require_common_supertype};

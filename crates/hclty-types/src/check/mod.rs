//! Convertibility between types.
//!
//! - **convert**: the one-directional `is_convertible` relation and its
//!   `Result`-returning wrapper

pub mod convert;

pub use convert::{ensure_convertible, is_convertible};

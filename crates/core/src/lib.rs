//! Domain primitives shared by the storefront crates.

pub mod error;
pub mod types;
pub mod validation;

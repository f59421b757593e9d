//! Row models and input DTOs, one module per table.

pub mod cart_item;
pub mod favorite;
pub mod product;
pub mod user;

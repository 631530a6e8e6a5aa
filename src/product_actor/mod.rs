//! Product-specific domain logic: stock and rating-aggregate actions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

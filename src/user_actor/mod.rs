//! User registry entity.

pub mod entity;
pub mod error;

pub use error::*;

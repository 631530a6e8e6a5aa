//! Stored payment records. Immutable once written.

pub mod entity;
pub mod error;

pub use error::*;

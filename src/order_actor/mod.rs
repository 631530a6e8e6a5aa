//! Order lifecycle: the status state machine and order immutability.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

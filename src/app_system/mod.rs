//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod logging;
pub mod storefront_system;

pub use config::*;
pub use logging::*;
pub use storefront_system::*;

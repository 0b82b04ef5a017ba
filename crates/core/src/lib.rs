// Schoolhouse Core - Domain Model, Ports & Services
// NO infrastructure dependencies (the engine lives behind the ports)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, ConstraintKind, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

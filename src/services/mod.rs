// Service exports
pub mod loader;

pub use loader::{load_export, parse_export, LoadError};

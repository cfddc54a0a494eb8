pub mod env;
mod loader;

pub use env::{AppConfig, LoggingConfig, OcrConfig, ServerConfig};
pub use loader::load_config;

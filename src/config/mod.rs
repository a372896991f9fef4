//! Configuration module.
//!
//! Provides `AppConfig` (top-level settings), `AppPaths` for the
//! cross-platform config directory, and TOML persistence via
//! `AppConfig::load` / `AppConfig::save_to`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, DefaultsConfig, ServiceConfig};

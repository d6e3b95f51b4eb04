// src/config/mod.rs

//! Configuration: TOML file model, loading, CLI merge and validation.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_from_path, load_optional};
pub use model::{ConfigFile, GenerateSection, PathsSection, Settings, WatchSection};
pub use validate::validate_settings;

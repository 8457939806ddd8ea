//! Settings persistence backed by a TOML file.

mod service;

pub use service::SettingsService;

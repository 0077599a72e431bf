// BuildForge - multi-platform build orchestration
//
// This is the library crate containing the resolution and orchestration
// logic. The binary crate (main.rs) provides the CLI entry point.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{SettingsManager, YamlDefineStore};
pub use models::{
    BuildOutcome, BuildReport, BuildTarget, GlobalSettings, PlatformSpec, ProductInfo, TargetGroup,
};
pub use services::{BuildBackend, BuildOrchestrator, CommandBackend, DefineStore, Revealer};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

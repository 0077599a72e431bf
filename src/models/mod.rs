//! Data models for the build orchestrator.
//!
//! - [`GlobalSettings`]: project-wide defaults shared by every platform
//! - [`PlatformSpec`]: per-target overrides layered on top of the defaults
//! - [`ProductInfo`]: product metadata substituted into output patterns
//! - [`BuildReport`]: backend result consumed by the orchestrator
//!
//! All persisted records derive `Serialize`/`Deserialize` for YAML storage;
//! build resolution treats them as read-only inputs and produces derived,
//! single-use values instead of mutating them.

pub mod report;
pub mod settings;

pub use report::{BuildOptions, BuildOutcome, BuildReport};
pub use settings::{
    BoolOverride, BuildTarget, GlobalSettings, OverrideMode, ParseTargetError, PlatformSpec,
    ProductInfo, TargetGroup,
};

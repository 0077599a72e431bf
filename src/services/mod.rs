//! Services module - core build resolution and orchestration logic.
//!
//! Everything here is framework-agnostic and takes its inputs explicitly, so
//! it is testable without a CLI or a real build backend.
//!
//! # Components
//!
//! - [`paths`]: pure template substitution turning symbolic output patterns
//!   into concrete filesystem paths
//! - [`resolve`]: merges [`GlobalSettings`](crate::models::GlobalSettings)
//!   with a platform's overrides into one [`EffectiveConfig`]
//! - [`symbols`]: the [`SymbolTransaction`] wrapping a build in a
//!   snapshot/union/restore cycle over the external define store
//! - [`backend`]: the [`BuildBackend`] seam plus the stock subprocess
//!   implementation
//! - [`reveal`]: file-browser reveal collaborator
//! - [`orchestrator`]: the [`BuildOrchestrator`] driving single builds and
//!   fail-fast batches
//!
//! # Design Philosophy
//!
//! - Resolution never fails: configuration ambiguities (unknown tokens,
//!   missing platform entries) degrade to documented fallbacks.
//! - Backend failure travels as a returned [`BuildReport`](crate::models::BuildReport),
//!   never as thrown control flow, so callers can inspect and decide.
//! - All external state mutation (compiler defines) is scoped and restored
//!   on every exit path.

pub mod backend;
pub mod orchestrator;
pub mod paths;
pub mod resolve;
pub mod reveal;
pub mod symbols;

pub use backend::{BuildBackend, CommandBackend};
pub use orchestrator::BuildOrchestrator;
pub use resolve::{EffectiveConfig, get_or_default_platform, resolve_effective_config};
pub use reveal::{Revealer, SystemRevealer};
pub use symbols::{DefineStore, SymbolTransaction};

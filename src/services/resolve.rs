//! Merges global settings with a platform's overrides into one effective
//! build configuration.
//!
//! Resolution is infallible by design: an unknown template token degrades to
//! literal text and a missing platform entry synthesizes identity defaults,
//! so every known target always resolves.

use crate::models::{
    BuildOptions, BuildTarget, GlobalSettings, OverrideMode, PlatformSpec, ProductInfo, TargetGroup,
};
use crate::services::paths;
use camino::{Utf8Path, Utf8PathBuf};

/// Fully resolved configuration for one build invocation.
///
/// Derived from the settings immediately before a build, consumed by exactly
/// one backend invocation, never persisted.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub target: BuildTarget,
    pub group: TargetGroup,
    pub output_path: Utf8PathBuf,
    pub scenes: Vec<String>,
    pub options: BuildOptions,
}

/// Look up a target's platform settings, falling back to identity defaults
/// when the settings hold no entry for it.
pub fn get_or_default_platform(settings: &GlobalSettings, target: BuildTarget) -> PlatformSpec {
    settings
        .platforms
        .iter()
        .find(|p| p.target == target)
        .cloned()
        .unwrap_or_else(|| PlatformSpec::new(target))
}

/// Resolve the effective configuration for one platform.
///
/// Scene order is: global defaults minus the platform's exclusions
/// (original order preserved), then the platform's extras in declaration
/// order. Duplicates across the two lists are kept; callers may double-include
/// on purpose.
pub fn resolve_effective_config(
    settings: &GlobalSettings,
    platform: &PlatformSpec,
    product: &ProductInfo,
    project_root: &Utf8Path,
    auto_run: bool,
) -> EffectiveConfig {
    let mut scenes: Vec<String> = settings
        .included_scenes
        .iter()
        .filter(|scene| !platform.excluded_scenes.contains(scene.as_str()))
        .cloned()
        .collect();
    scenes.extend(platform.extra_scenes.iter().cloned());

    let pattern = match platform.output_pattern_mode {
        OverrideMode::Override => platform.override_pattern.as_str(),
        OverrideMode::UseDefault => settings.output_pattern.as_str(),
    };

    let output_path = paths::resolve_output_folder(&settings.output_folder, project_root)
        .join(paths::resolve_output_pattern(pattern, platform, product));

    let options = BuildOptions {
        development: platform.development_build.resolve(settings.development_build),
        auto_run,
    };

    EffectiveConfig {
        target: platform.target,
        group: platform.target.group(),
        output_path,
        scenes,
        options,
    }
}

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A build target: one compilation/output configuration.
///
/// The variant names double as the `{platform}` token value in output
/// patterns, so they are stable identifiers and part of the settings file
/// format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildTarget {
    StandaloneWindows,
    StandaloneWindows64,
    StandaloneLinux64,
    StandaloneOSX,
    Android,
    #[serde(rename = "iOS")]
    Ios,
    WebGL,
}

impl BuildTarget {
    /// All known targets, in a stable order.
    pub const ALL: [BuildTarget; 7] = [
        BuildTarget::StandaloneWindows,
        BuildTarget::StandaloneWindows64,
        BuildTarget::StandaloneLinux64,
        BuildTarget::StandaloneOSX,
        BuildTarget::Android,
        BuildTarget::Ios,
        BuildTarget::WebGL,
    ];

    /// Canonical target name, substituted for the `{platform}` token.
    pub fn name(&self) -> &'static str {
        match self {
            BuildTarget::StandaloneWindows => "StandaloneWindows",
            BuildTarget::StandaloneWindows64 => "StandaloneWindows64",
            BuildTarget::StandaloneLinux64 => "StandaloneLinux64",
            BuildTarget::StandaloneOSX => "StandaloneOSX",
            BuildTarget::Android => "Android",
            BuildTarget::Ios => "iOS",
            BuildTarget::WebGL => "WebGL",
        }
    }

    /// The target group this target belongs to.
    ///
    /// Targets in one group share a single compiler-define namespace.
    pub fn group(&self) -> TargetGroup {
        match self {
            BuildTarget::StandaloneWindows
            | BuildTarget::StandaloneWindows64
            | BuildTarget::StandaloneLinux64
            | BuildTarget::StandaloneOSX => TargetGroup::Standalone,
            BuildTarget::Android => TargetGroup::Android,
            BuildTarget::Ios => TargetGroup::Ios,
            BuildTarget::WebGL => TargetGroup::WebGL,
        }
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug)]
#[error("unknown build target: {0}")]
pub struct ParseTargetError(String);

impl FromStr for BuildTarget {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildTarget::ALL
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| ParseTargetError(s.to_string()))
    }
}

/// A coarser grouping of build targets sharing a compiler-define namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetGroup {
    Standalone,
    Android,
    #[serde(rename = "iOS")]
    Ios,
    WebGL,
}

impl TargetGroup {
    pub fn name(&self) -> &'static str {
        match self {
            TargetGroup::Standalone => "Standalone",
            TargetGroup::Android => "Android",
            TargetGroup::Ios => "iOS",
            TargetGroup::WebGL => "WebGL",
        }
    }
}

impl fmt::Display for TargetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a platform uses the global default value or its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverrideMode {
    #[default]
    UseDefault,
    Override,
}

/// Tri-state boolean platform option.
///
/// `UseDefault` is a first-class, serializable state distinct from an
/// explicit `No`, so a platform can inherit the global default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoolOverride {
    #[default]
    UseDefault,
    Yes,
    No,
}

impl BoolOverride {
    /// Resolve against the global default.
    pub fn resolve(self, default: bool) -> bool {
        match self {
            BoolOverride::UseDefault => default,
            BoolOverride::Yes => true,
            BoolOverride::No => false,
        }
    }
}

/// Per-platform build settings layered over [`GlobalSettings`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub target: BuildTarget,

    /// Forced onto the resolved output path; empty strips any extension.
    #[serde(default)]
    pub file_extension: String,

    #[serde(default)]
    pub output_pattern_mode: OverrideMode,

    /// Output pattern used when `output_pattern_mode` is `Override`.
    #[serde(default)]
    pub override_pattern: String,

    /// Scenes added for this platform only, after the defaults.
    #[serde(default)]
    pub extra_scenes: Vec<String>,

    /// Scenes removed from the global default list for this platform only.
    #[serde(default)]
    pub excluded_scenes: IndexSet<String>,

    /// Compiler defines layered on for the duration of a build only.
    #[serde(default)]
    pub additional_symbols: IndexSet<String>,

    #[serde(default)]
    pub development_build: BoolOverride,
}

impl PlatformSpec {
    /// Default platform settings for a build target.
    pub fn new(target: BuildTarget) -> Self {
        let file_extension = match target {
            BuildTarget::StandaloneWindows | BuildTarget::StandaloneWindows64 => "exe".to_string(),
            _ => String::new(),
        };

        Self {
            target,
            file_extension,
            output_pattern_mode: OverrideMode::UseDefault,
            override_pattern: String::new(),
            extra_scenes: Vec::new(),
            excluded_scenes: IndexSet::new(),
            additional_symbols: IndexSet::new(),
            development_build: BoolOverride::UseDefault,
        }
    }
}

/// Global build settings shared by all platforms.
///
/// Persisted via [`SettingsManager`](crate::config::SettingsManager); never
/// mutated by build resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Per-platform overrides. Target uniqueness is a caller responsibility;
    /// lookup takes the first matching entry.
    #[serde(default)]
    pub platforms: Vec<PlatformSpec>,

    /// Default scenes included in every platform's build.
    #[serde(default)]
    pub included_scenes: Vec<String>,

    /// Output folder path template (`{project}` token).
    pub output_folder: String,

    /// Output path template applied within the output folder.
    pub output_pattern: String,

    #[serde(default)]
    pub development_build: bool,

    /// Reveal the output location after a successful manual build.
    #[serde(default)]
    pub open_build_folder: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            platforms: vec![PlatformSpec::new(BuildTarget::StandaloneWindows64)],
            included_scenes: Vec::new(),
            output_folder: "{project}/Builds".to_string(),
            output_pattern: "{platform}/{product}-{version}/{product}".to_string(),
            development_build: false,
            open_build_folder: true,
        }
    }
}

/// Product metadata substituted into output patterns.
///
/// Stands in for the host tool's application info; read-only to the build
/// core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductInfo {
    #[serde(default)]
    pub product_name: String,

    #[serde(default)]
    pub company_name: String,

    /// Application identifier (reverse-DNS style).
    #[serde(default)]
    pub identifier: String,

    #[serde(default)]
    pub version: String,

    /// Host tool version string, substituted for `{unityversion}`.
    #[serde(default)]
    pub engine_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_group_mapping() {
        assert_eq!(BuildTarget::StandaloneWindows64.group(), TargetGroup::Standalone);
        assert_eq!(BuildTarget::StandaloneLinux64.group(), TargetGroup::Standalone);
        assert_eq!(BuildTarget::Android.group(), TargetGroup::Android);
        assert_eq!(BuildTarget::WebGL.group(), TargetGroup::WebGL);
    }

    #[test]
    fn test_target_parse() {
        assert_eq!(
            "StandaloneWindows64".parse::<BuildTarget>().unwrap(),
            BuildTarget::StandaloneWindows64
        );
        assert_eq!("ios".parse::<BuildTarget>().unwrap(), BuildTarget::Ios);
        assert!("Amiga".parse::<BuildTarget>().is_err());
    }

    #[test]
    fn test_platform_spec_windows_extension() {
        assert_eq!(PlatformSpec::new(BuildTarget::StandaloneWindows).file_extension, "exe");
        assert_eq!(PlatformSpec::new(BuildTarget::StandaloneWindows64).file_extension, "exe");
        assert_eq!(PlatformSpec::new(BuildTarget::StandaloneLinux64).file_extension, "");
        assert_eq!(PlatformSpec::new(BuildTarget::Android).file_extension, "");
    }

    #[test]
    fn test_bool_override_resolution() {
        assert!(BoolOverride::UseDefault.resolve(true));
        assert!(!BoolOverride::UseDefault.resolve(false));
        assert!(BoolOverride::Yes.resolve(false));
        assert!(!BoolOverride::No.resolve(true));
    }

    #[test]
    fn test_global_settings_defaults() {
        let settings = GlobalSettings::default();
        assert_eq!(settings.output_folder, "{project}/Builds");
        assert_eq!(settings.output_pattern, "{platform}/{product}-{version}/{product}");
        assert!(!settings.development_build);
        assert!(settings.open_build_folder);
        assert_eq!(settings.platforms.len(), 1);
    }

    #[test]
    fn test_platform_spec_yaml_round_trip() {
        let mut spec = PlatformSpec::new(BuildTarget::Android);
        spec.additional_symbols.insert("DEMO_BUILD".to_string());
        spec.development_build = BoolOverride::Yes;

        let yaml = serde_yaml_ng::to_string(&spec).unwrap();
        let loaded: PlatformSpec = serde_yaml_ng::from_str(&yaml).unwrap();

        assert_eq!(loaded.target, BuildTarget::Android);
        assert!(loaded.additional_symbols.contains("DEMO_BUILD"));
        assert_eq!(loaded.development_build, BoolOverride::Yes);
    }
}

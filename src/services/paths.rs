//! Pure template-substitution for output paths.
//!
//! Token substitution is literal, case-sensitive, and non-recursive: a token
//! appearing inside a substituted value is never expanded again, and unknown
//! tokens pass through verbatim (they are indistinguishable from user text
//! at this layer). No I/O happens here.

use crate::models::{PlatformSpec, ProductInfo};
use camino::{Utf8Path, Utf8PathBuf};
use std::path::MAIN_SEPARATOR;

/// Resolve an output-folder pattern to a path.
///
/// Recognizes `{project}`, substituted with the project root supplied by the
/// caller. Separators are normalized to the host convention.
pub fn resolve_output_folder(pattern: &str, project_root: &Utf8Path) -> Utf8PathBuf {
    let pattern = normalize_separators(pattern);
    let root = normalize_separators(project_root.as_str());
    Utf8PathBuf::from(substitute(&pattern, &[("{project}", &root)]))
}

/// Resolve an output pattern to a path within the output folder.
///
/// Substitutes `{platform}`, `{product}`, `{company}`, `{identifier}`,
/// `{version}` and `{unityversion}`, then forces the extension to the
/// platform's `file_extension` (an empty extension strips any existing one,
/// so authors never need to embed extensions in patterns).
pub fn resolve_output_pattern(
    pattern: &str,
    platform: &PlatformSpec,
    product: &ProductInfo,
) -> Utf8PathBuf {
    let pattern = normalize_separators(pattern);
    let resolved = substitute(
        &pattern,
        &[
            ("{platform}", platform.target.name()),
            ("{product}", &product.product_name),
            ("{company}", &product.company_name),
            ("{identifier}", &product.identifier),
            ("{version}", &product.version),
            ("{unityversion}", &product.engine_version),
        ],
    );

    let mut path = Utf8PathBuf::from(resolved);
    path.set_extension(&platform.file_extension);
    path
}

fn normalize_separators(s: &str) -> String {
    s.replace('/', &MAIN_SEPARATOR.to_string())
}

/// Single left-to-right pass over the input; each token site is replaced at
/// most once and substituted text is never rescanned.
fn substitute(input: &str, tokens: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    'scan: while !rest.is_empty() {
        for (token, value) in tokens {
            if let Some(stripped) = rest.strip_prefix(token) {
                out.push_str(value);
                rest = stripped;
                continue 'scan;
            }
        }

        let mut chars = rest.chars();
        // rest is non-empty, so next() always yields
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BuildTarget;

    fn sample_product() -> ProductInfo {
        ProductInfo {
            product_name: "Game".to_string(),
            company_name: "Acme".to_string(),
            identifier: "com.acme.game".to_string(),
            version: "1.0".to_string(),
            engine_version: "2021.3.0f1".to_string(),
        }
    }

    fn native(p: &str) -> String {
        p.replace('/', &MAIN_SEPARATOR.to_string())
    }

    #[test]
    fn test_folder_project_token() {
        let path = resolve_output_folder("{project}/Builds", Utf8Path::new("/work/game"));
        assert_eq!(path, Utf8PathBuf::from(native("/work/game/Builds")));
    }

    #[test]
    fn test_pattern_full_substitution() {
        let platform = PlatformSpec::new(BuildTarget::StandaloneWindows64);
        let path = resolve_output_pattern(
            "{platform}/{product}-{version}/{product}",
            &platform,
            &sample_product(),
        );
        assert_eq!(
            path,
            Utf8PathBuf::from(native("StandaloneWindows64/Game-1.0/Game.exe"))
        );
    }

    #[test]
    fn test_pattern_company_identifier_engine_tokens() {
        let platform = PlatformSpec::new(BuildTarget::StandaloneLinux64);
        let path = resolve_output_pattern(
            "{company}/{identifier}/{unityversion}/{product}",
            &platform,
            &sample_product(),
        );
        assert_eq!(
            path,
            Utf8PathBuf::from(native("Acme/com.acme.game/2021.3.0f1/Game"))
        );
    }

    #[test]
    fn test_unknown_token_passes_through() {
        let platform = PlatformSpec::new(BuildTarget::StandaloneLinux64);
        let path = resolve_output_pattern("{nonsense}/{product}", &platform, &sample_product());
        assert_eq!(path, Utf8PathBuf::from(native("{nonsense}/Game")));

        // Idempotent on a second pass once no recognized tokens remain.
        let again = resolve_output_pattern(path.as_str(), &platform, &sample_product());
        assert_eq!(again, path);
    }

    #[test]
    fn test_substitution_is_not_recursive() {
        let product = ProductInfo {
            product_name: "{version}".to_string(),
            version: "1.0".to_string(),
            ..Default::default()
        };
        let platform = PlatformSpec::new(BuildTarget::StandaloneLinux64);
        let path = resolve_output_pattern("{product}", &platform, &product);
        // The token inside the substituted value is left as literal text.
        assert_eq!(path, Utf8PathBuf::from("{version}"));
    }

    #[test]
    fn test_extension_forced_over_existing() {
        let mut platform = PlatformSpec::new(BuildTarget::StandaloneWindows64);
        platform.file_extension = "exe".to_string();
        let path = resolve_output_pattern("{product}.zip", &platform, &sample_product());
        assert_eq!(path, Utf8PathBuf::from("Game.exe"));
    }

    #[test]
    fn test_empty_extension_strips() {
        let platform = PlatformSpec::new(BuildTarget::StandaloneLinux64);
        assert!(platform.file_extension.is_empty());
        let path = resolve_output_pattern("{product}.zip", &platform, &sample_product());
        assert_eq!(path, Utf8PathBuf::from("Game"));
    }

    #[test]
    fn test_case_sensitive_tokens() {
        let platform = PlatformSpec::new(BuildTarget::StandaloneLinux64);
        let path = resolve_output_pattern("{Product}", &platform, &sample_product());
        assert_eq!(path, Utf8PathBuf::from("{Product}"));
    }
}

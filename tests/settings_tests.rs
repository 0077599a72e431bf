//! Integration tests for settings persistence and the define store.

use buildforge::config::SettingsManager;
use buildforge::models::{BoolOverride, BuildTarget, GlobalSettings, PlatformSpec, TargetGroup};
use buildforge::services::DefineStore;
use camino::Utf8PathBuf;
use indexmap::IndexSet;
use tempfile::TempDir;

fn manager_in_temp_dir() -> (SettingsManager, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let manager = SettingsManager::new(dir.join("settings")).unwrap();
    (manager, temp_dir)
}

#[test]
fn test_first_access_creates_default_files() {
    let (manager, _temp_dir) = manager_in_temp_dir();

    let settings = manager.load_or_create_settings().unwrap();
    let product = manager.load_or_create_product().unwrap();

    assert_eq!(settings.output_folder, "{project}/Builds");
    assert_eq!(settings.output_pattern, "{platform}/{product}-{version}/{product}");
    assert!(settings.open_build_folder);
    assert_eq!(settings.platforms[0].target, BuildTarget::StandaloneWindows64);
    assert!(product.product_name.is_empty());

    assert!(manager.config_dir().join("builder.yaml").exists());
    assert!(manager.config_dir().join("product.yaml").exists());
}

#[test]
fn test_settings_survive_full_round_trip() {
    let (manager, _temp_dir) = manager_in_temp_dir();

    let mut spec = PlatformSpec::new(BuildTarget::Android);
    spec.additional_symbols.insert("MOBILE_DEMO".to_string());
    spec.development_build = BoolOverride::Yes;
    spec.excluded_scenes.insert("Scenes/DesktopOnly".to_string());

    let settings = GlobalSettings {
        platforms: vec![PlatformSpec::new(BuildTarget::StandaloneWindows64), spec],
        included_scenes: vec!["Scenes/Boot".to_string(), "Scenes/DesktopOnly".to_string()],
        development_build: true,
        ..Default::default()
    };
    manager.save_settings(&settings).unwrap();

    let loaded = manager.load_or_create_settings().unwrap();
    assert_eq!(loaded.platforms.len(), 2);
    assert!(loaded.development_build);

    let android = &loaded.platforms[1];
    assert_eq!(android.target, BuildTarget::Android);
    assert!(android.additional_symbols.contains("MOBILE_DEMO"));
    assert_eq!(android.development_build, BoolOverride::Yes);
    assert!(android.excluded_scenes.contains("Scenes/DesktopOnly"));
}

#[test]
fn test_define_store_persists_across_reopen() {
    let (manager, _temp_dir) = manager_in_temp_dir();

    let mut store = manager.open_define_store().unwrap();
    let defines: IndexSet<String> = ["ALPHA".to_string(), "BETA".to_string(), "GAMMA".to_string()]
        .into_iter()
        .collect();
    store.set_defines(TargetGroup::Standalone, &defines).unwrap();
    store
        .set_defines(TargetGroup::Android, &["MOBILE".to_string()].into_iter().collect())
        .unwrap();

    let reopened = manager.open_define_store().unwrap();
    let standalone = reopened.get_defines(TargetGroup::Standalone).unwrap();
    assert_eq!(
        standalone.iter().cloned().collect::<Vec<_>>(),
        vec!["ALPHA", "BETA", "GAMMA"],
        "insertion order is the canonical serialization order"
    );
    assert_eq!(reopened.get_defines(TargetGroup::Android).unwrap().len(), 1);
    assert!(reopened.get_defines(TargetGroup::WebGL).unwrap().is_empty());
}

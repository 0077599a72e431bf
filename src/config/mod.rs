use crate::models::{GlobalSettings, ProductInfo, TargetGroup};
use crate::services::DefineStore;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::{IndexMap, IndexSet};
use std::fs;

/// Settings manager for loading and saving YAML configuration files.
///
/// Manages the persisted records of the build core:
/// - Builder settings (`builder.yaml`): global defaults + per-platform specs
/// - Product info (`product.yaml`): metadata substituted into output patterns
/// - Compiler defines (`defines.yaml`): per-target-group define lists,
///   opened separately as a [`YamlDefineStore`]
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
    product_path: Utf8PathBuf,
    defines_path: Utf8PathBuf,
}

impl SettingsManager {
    /// Create a new SettingsManager rooted at the given directory, creating
    /// the directory if needed.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join("builder.yaml"),
            product_path: config_dir.join("product.yaml"),
            defines_path: config_dir.join("defines.yaml"),
            config_dir,
        })
    }

    /// Load the builder settings, writing defaults on first access.
    pub fn load_or_create_settings(&self) -> Result<GlobalSettings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Builder settings not found at {}, creating defaults",
                self.settings_path
            );
            let settings = GlobalSettings::default();
            self.save_settings(&settings)?;
            return Ok(settings);
        }

        let file_contents = fs::read_to_string(&self.settings_path)
            .with_context(|| format!("Failed to read builder settings: {}", self.settings_path))?;

        let settings: GlobalSettings = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse builder settings: {}", self.settings_path))?;

        tracing::info!("Loaded builder settings from {}", self.settings_path);
        Ok(settings)
    }

    /// Save the builder settings.
    pub fn save_settings(&self, settings: &GlobalSettings) -> Result<()> {
        let yaml_string = serde_yaml_ng::to_string(settings)
            .context("Failed to serialize builder settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write builder settings: {}", self.settings_path))?;

        tracing::info!("Saved builder settings to {}", self.settings_path);
        Ok(())
    }

    /// Load the product info, writing defaults on first access.
    pub fn load_or_create_product(&self) -> Result<ProductInfo> {
        if !self.product_path.exists() {
            tracing::warn!(
                "Product info not found at {}, creating defaults",
                self.product_path
            );
            let product = ProductInfo::default();
            self.save_product(&product)?;
            return Ok(product);
        }

        let file_contents = fs::read_to_string(&self.product_path)
            .with_context(|| format!("Failed to read product info: {}", self.product_path))?;

        let product: ProductInfo = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse product info: {}", self.product_path))?;

        tracing::info!("Loaded product info from {}", self.product_path);
        Ok(product)
    }

    /// Save the product info.
    pub fn save_product(&self, product: &ProductInfo) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(product).context("Failed to serialize product info to YAML")?;

        fs::write(&self.product_path, yaml_string)
            .with_context(|| format!("Failed to write product info: {}", self.product_path))?;

        tracing::info!("Saved product info to {}", self.product_path);
        Ok(())
    }

    /// Open the define store backing file.
    pub fn open_define_store(&self) -> Result<YamlDefineStore> {
        YamlDefineStore::open(&self.defines_path)
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

/// YAML-backed compiler-define store: one ordered define list per target
/// group.
///
/// Reads come from the in-memory copy loaded at open; every write goes
/// straight back to disk so define state survives a crashed build. Lists are
/// duplicate-tolerant on read and written in insertion order, keeping the
/// serialized form deterministic.
#[derive(Debug)]
pub struct YamlDefineStore {
    path: Utf8PathBuf,
    groups: IndexMap<String, Vec<String>>,
}

impl YamlDefineStore {
    pub fn open<P: AsRef<Utf8Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let groups = if path.exists() {
            let file_contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read define store: {}", path))?;
            serde_yaml_ng::from_str(&file_contents)
                .with_context(|| format!("Failed to parse define store: {}", path))?
        } else {
            IndexMap::new()
        };

        Ok(Self { path, groups })
    }

    fn persist(&self) -> Result<()> {
        let yaml_string = serde_yaml_ng::to_string(&self.groups)
            .context("Failed to serialize define store to YAML")?;
        fs::write(&self.path, yaml_string)
            .with_context(|| format!("Failed to write define store: {}", self.path))?;
        Ok(())
    }
}

impl DefineStore for YamlDefineStore {
    fn get_defines(&self, group: TargetGroup) -> Result<IndexSet<String>> {
        Ok(self
            .groups
            .get(group.name())
            .map(|defines| defines.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn set_defines(&mut self, group: TargetGroup, defines: &IndexSet<String>) -> Result<()> {
        self.groups
            .insert(group.name().to_string(), defines.iter().cloned().collect());
        self.persist()
    }
}

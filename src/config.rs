//! Import settings.
//!
//! Everything the importer needs is carried in one [`ImportConfig`] that is
//! built once (defaults, then an optional TOML file, then CLI overrides) and
//! passed by reference afterwards.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Target render engine; decides which surface shader and handler table are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
    /// Cycles/EEVEE with a Principled BSDF.
    #[default]
    Cycles,
    /// Octane with a Standard Surface material.
    Octane,
}

/// Kinds of datablocks that can be wiped from the open file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CleanupTarget {
    Materials,
    Images,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveLinkConfig {
    pub address: String,
    pub timeout_secs: u64,
}

impl Default for LiveLinkConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:8080".to_string(),
            timeout_secs: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Directory holding the texture files.
    pub folder: PathBuf,
    /// Bare extension without the dot, e.g. `png`.
    pub image_format: String,
    pub renderer: Renderer,
    /// What to remove before importing. `images` only removes images whose
    /// name contains one of the imported material names.
    pub cleanup: BTreeSet<CleanupTarget>,
    /// Map codes that are grouped but never wired.
    pub ignore_maps: BTreeSet<String>,
    pub mat_name_prefix: String,
    pub mat_name_separator: String,
    /// Strength fed into the normal-map group (Cycles).
    pub normal_strength: f32,
    /// Power of the normal image node (Octane).
    pub octane_normal_power: f32,
    /// Emit the normal-map group script when it is missing from the file.
    pub ensure_normal_group: bool,
    pub live_link: LiveLinkConfig,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("."),
            image_format: "png".to_string(),
            renderer: Renderer::Cycles,
            cleanup: BTreeSet::from([CleanupTarget::Images]),
            ignore_maps: BTreeSet::from(["2cl".to_string()]),
            mat_name_prefix: String::new(),
            mat_name_separator: String::new(),
            normal_strength: 1.0,
            octane_normal_power: 0.3,
            ensure_normal_group: true,
            live_link: LiveLinkConfig::default(),
        }
    }
}

impl ImportConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|source| Error::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// `prefix + separator + base`, e.g. `"Prefix_" + "Wall"`.
    pub fn material_name(&self, base: &str) -> String {
        format!(
            "{}{}{}",
            self.mat_name_prefix, self.mat_name_separator, base
        )
    }

    pub fn is_ignored(&self, map_code: &str) -> bool {
        self.ignore_maps.contains(map_code)
    }

    /// Checks the values that end up inside generated Python or on the socket.
    /// Run again after CLI overrides.
    pub fn validate(&self) -> Result<()> {
        validate_name_part("mat_name_prefix", &self.mat_name_prefix)?;
        validate_name_part("mat_name_separator", &self.mat_name_separator)?;
        if self.live_link.timeout_secs == 0 {
            return Err(Error::InvalidSetting {
                field: "live_link.timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The configured extension with a leading dot stripped.
    pub fn extension(&self) -> Result<&str> {
        validate_extension(&self.image_format)
    }
}

pub fn validate_extension(ext: &str) -> Result<&str> {
    let bare = ext.strip_prefix('.').unwrap_or(ext);
    if bare.is_empty() || bare.contains(['/', '\\']) {
        return Err(Error::InvalidExtension(ext.to_string()));
    }
    Ok(bare)
}

fn validate_name_part(field: &'static str, value: &str) -> Result<()> {
    if let Some(c) = value.chars().find(|c| c.is_control()) {
        return Err(Error::InvalidSetting {
            field,
            reason: format!("control character {:?} is not allowed", c),
        });
    }
    Ok(())
}

// ----------------------------------------------------------------------------
// unittest
// ----------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ImportConfig::default();
        assert_eq!(cfg.image_format, "png");
        assert_eq!(cfg.renderer, Renderer::Cycles);
        assert!(cfg.cleanup.contains(&CleanupTarget::Images));
        assert!(!cfg.cleanup.contains(&CleanupTarget::Materials));
        assert!(cfg.is_ignored("2cl"));
        assert_eq!(cfg.live_link.address, "127.0.0.1:8080");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = ImportConfig::from_toml(
            r#"
folder = "X:/Assets/PlayerMake"
renderer = "octane"
mat_name_prefix = "Prefix"
mat_name_separator = "_"
cleanup = ["materials", "images"]

[live_link]
address = "10.0.0.2:9000"
"#,
        )
        .unwrap();

        assert_eq!(cfg.folder, PathBuf::from("X:/Assets/PlayerMake"));
        assert_eq!(cfg.renderer, Renderer::Octane);
        assert_eq!(cfg.image_format, "png");
        assert_eq!(cfg.cleanup.len(), 2);
        assert_eq!(cfg.live_link.address, "10.0.0.2:9000");
        assert_eq!(cfg.live_link.timeout_secs, 2);
        assert_eq!(cfg.material_name("Wall"), "Prefix_Wall");
    }

    #[test]
    fn test_unknown_renderer_is_rejected() {
        assert!(ImportConfig::from_toml("renderer = \"arnold\"").is_err());
    }

    #[test]
    fn test_extension_validation() {
        assert_eq!(validate_extension("png").unwrap(), "png");
        assert_eq!(validate_extension(".tga").unwrap(), "tga");
        assert!(matches!(
            validate_extension(""),
            Err(Error::InvalidExtension(_))
        ));
        assert!(validate_extension(".").is_err());
        assert!(validate_extension("a/b").is_err());
    }

    #[test]
    fn test_control_characters_in_material_name_parts_are_rejected() {
        let cfg = ImportConfig {
            mat_name_separator: "\n".into(),
            ..ImportConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(Error::InvalidSetting { field: "mat_name_separator", .. })
        ));

        let cfg = ImportConfig {
            mat_name_prefix: "P\timport".into(),
            ..ImportConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ImportConfig {
            mat_name_prefix: "P\"x".into(),
            mat_name_separator: " - ".into(),
            ..ImportConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_is_rejected_on_load() {
        let path = std::env::temp_dir().join(format!(
            "bankara-timeout-{}.toml",
            uuid::Uuid::new_v4().simple()
        ));
        fs::write(&path, "[live_link]\ntimeout_secs = 0\n").unwrap();
        let result = ImportConfig::load(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(
            result,
            Err(Error::InvalidSetting { field: "live_link.timeout_secs", .. })
        ));
        assert!(ImportConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let path = std::env::temp_dir().join(format!(
            "bankara-no-config-{}.toml",
            uuid::Uuid::new_v4().simple()
        ));
        assert!(matches!(
            ImportConfig::load(&path),
            Err(Error::ReadConfig { .. })
        ));
    }
}

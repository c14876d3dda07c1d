//! Application configuration.
//!
//! Read from a JSON file; every field is optional.
//!
//! ```
//! use aina::config::Config;
//! use aina::resolve::ResolverMode;
//!
//! let config = Config::from_json(r#"{ "resolver": "placeholder", "viewer": { "dragSensitivity": 0.01 } }"#).unwrap();
//! assert_eq!(config.resolver, ResolverMode::Placeholder);
//! assert_eq!(config.viewer.drag_sensitivity, 0.01);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resolve::ResolverMode;
use crate::units::WeightPolicy;
use crate::viewer::ViewerConfig;

/// Default directory for saved profiles.
pub const DEFAULT_STORE_DIR: &str = ".aina";

/// Top-level settings shared by the CLI and the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Viewer options.
    pub viewer: ViewerConfig,
    /// Which classification picks the model.
    pub resolver: ResolverMode,
    /// Whether weight follows unit switches.
    pub weight_policy: WeightPolicy,
    /// Directory for the profile store.
    pub store_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewer: ViewerConfig::default(),
            resolver: ResolverMode::default(),
            weight_policy: WeightPolicy::default(),
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
        }
    }
}

impl Config {
    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Read `path` if given, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::AssetFormat;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_nested_fields() {
        let json = r#"{
            "weightPolicy": "keep",
            "storeDir": "/tmp/aina",
            "viewer": { "source": { "format": "obj" }, "camera": { "distance": 8.0 } }
        }"#;
        let config = Config::from_json(json).unwrap();
        assert_eq!(config.weight_policy, WeightPolicy::Keep);
        assert_eq!(config.store_dir, PathBuf::from("/tmp/aina"));
        assert_eq!(config.viewer.source.format, AssetFormat::Obj);
        assert_eq!(config.viewer.source.root, PathBuf::from("assets/models"));
        assert_eq!(config.viewer.camera.distance, 8.0);
        assert_eq!(config.viewer.target_height, 2.8);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aina.json");
        fs::write(&path, r#"{ "resolver": "placeholder" }"#).unwrap();
        let config = Config::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.resolver, ResolverMode::Placeholder);

        assert!(Config::load(dir.path().join("missing.json")).is_err());
        fs::write(&path, "{ nope").unwrap();
        assert!(Config::load(&path).is_err());
    }
}

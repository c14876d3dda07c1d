//! Mapping from a classified profile to a model asset.
//!
//! Asset keys follow the `gender_shape` convention (`male_trapezoid`,
//! `female_hourglass`, ...). The resolver never checks whether the file
//! exists; that is the loader's job.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classify::{body_type, classify, BodyType};
use crate::error::AinaError;
use crate::profile::{Gender, UserProfile};

/// Default directory holding the model files.
pub const DEFAULT_ASSET_ROOT: &str = "assets/models";

/// Normalized name of a loadable model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetKey(String);

impl AssetKey {
    /// Normalize a raw model name: lowercase, spaces replaced with underscores.
    ///
    /// ```
    /// use aina::resolve::AssetKey;
    ///
    /// assert_eq!(AssetKey::normalize("Female Plus Size").as_str(), "female_plus_size");
    /// ```
    pub fn normalize(raw: &str) -> Self {
        AssetKey(raw.to_lowercase().replace(' ', "_"))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Build the asset key for a gender and a shape or body-type name.
///
/// ```
/// use aina::resolve::resolve;
/// use aina::profile::Gender;
///
/// assert_eq!(resolve(Gender::Male, "trapezoid").as_str(), "male_trapezoid");
/// assert_eq!(resolve(Gender::Female, "Inverted Triangle").as_str(), "female_inverted_triangle");
/// ```
pub fn resolve(gender: Gender, shape: &str) -> AssetKey {
    AssetKey::normalize(&format!("{}_{}", gender.as_str(), shape))
}

/// Which classification drives model selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverMode {
    /// Use the fine-grained shape from [`classify`].
    #[default]
    Shape,
    /// Always use the `average` body-type model for the profile's gender.
    Placeholder,
}

impl ResolverMode {
    /// Resolve the asset key for a profile under this mode.
    pub fn resolve_profile(self, profile: &UserProfile) -> AssetKey {
        match self {
            ResolverMode::Shape => resolve(profile.gender, classify(profile).as_str()),
            ResolverMode::Placeholder => resolve(profile.gender, BodyType::Average.as_str()),
        }
    }
}

/// Resolve against the coarse chest bucket from [`body_type`].
pub fn resolve_body_type(profile: &UserProfile) -> AssetKey {
    resolve(profile.gender, body_type(profile).as_str())
}

/// On-disk format of the model files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFormat {
    /// Single binary glTF file, `<key>.glb`.
    #[default]
    Glb,
    /// Wavefront pair, `<key>.obj` with a sibling `<key>.mtl`.
    #[serde(alias = "objmtl")]
    Obj,
}

impl AssetFormat {
    /// Extension of the primary file.
    pub fn extension(self) -> &'static str {
        match self {
            AssetFormat::Glb => "glb",
            AssetFormat::Obj => "obj",
        }
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<AssetFormat> {
        match ext.to_lowercase().as_str() {
            "glb" | "gltf" => Some(AssetFormat::Glb),
            "obj" => Some(AssetFormat::Obj),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<AssetFormat> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(AssetFormat::from_extension)
    }
}

impl FromStr for AssetFormat {
    type Err = AinaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetFormat::from_extension(s.trim()).ok_or_else(|| AinaError::UnsupportedFormat {
            extension: s.to_string(),
        })
    }
}

/// Location template for model files: `<root>/<key>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSource {
    /// Directory containing the models.
    pub root: PathBuf,
    /// File format of every model under `root`.
    pub format: AssetFormat,
}

impl Default for AssetSource {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ASSET_ROOT),
            format: AssetFormat::default(),
        }
    }
}

impl AssetSource {
    /// Create a source rooted at `root`.
    pub fn new<P: Into<PathBuf>>(root: P, format: AssetFormat) -> Self {
        Self {
            root: root.into(),
            format,
        }
    }

    /// Path of the primary file for `key`.
    pub fn path_for(&self, key: &AssetKey) -> PathBuf {
        self.root
            .join(format!("{}.{}", key.as_str(), self.format.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ShapeLabel;

    #[test]
    fn test_resolve_naming() {
        assert_eq!(resolve(Gender::Male, "trapezoid").as_str(), "male_trapezoid");
        assert_eq!(
            resolve(Gender::Female, ShapeLabel::InvertedTriangle.as_str()).as_str(),
            "female_inverted_triangle"
        );
        assert_eq!(AssetKey::normalize("Male Plus  Size").as_str(), "male_plus__size");
    }

    #[test]
    fn test_modes() {
        let profile = UserProfile::for_gender(Gender::Male);
        assert_eq!(ResolverMode::Shape.resolve_profile(&profile).as_str(), "male_trapezoid");
        assert_eq!(
            ResolverMode::Placeholder.resolve_profile(&profile).as_str(),
            "male_average"
        );

        let mut big = profile.clone();
        big.chest = 112.0;
        big.belly = 120.0;
        assert_eq!(ResolverMode::Placeholder.resolve_profile(&big).as_str(), "male_average");
        assert_eq!(resolve_body_type(&big).as_str(), "male_curvy");
        assert_eq!(ResolverMode::Shape.resolve_profile(&big).as_str(), "male_oval");
    }

    #[test]
    fn test_unset_gender_still_resolves() {
        let key = ResolverMode::Shape.resolve_profile(&UserProfile::default());
        assert_eq!(key.as_str(), "unset_rectangle");
    }

    #[test]
    fn test_source_paths() {
        let key = AssetKey::normalize("female_hourglass");
        let glb = AssetSource::default();
        assert_eq!(glb.path_for(&key), PathBuf::from("assets/models/female_hourglass.glb"));

        let obj = AssetSource::new("/srv/models", AssetFormat::Obj);
        assert_eq!(obj.path_for(&key), PathBuf::from("/srv/models/female_hourglass.obj"));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(AssetFormat::from_path("a/b.GLB"), Some(AssetFormat::Glb));
        assert_eq!(AssetFormat::from_path("a/b.gltf"), Some(AssetFormat::Glb));
        assert_eq!(AssetFormat::from_path("a/b.obj"), Some(AssetFormat::Obj));
        assert_eq!(AssetFormat::from_path("a/b.stl"), None);
        assert!("fbx".parse::<AssetFormat>().is_err());
    }
}

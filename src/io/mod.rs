//! Model asset loading.
//!
//! # Supported Formats
//!
//! | Format | Extension | Notes |
//! |--------|-----------|-------|
//! | glTF binary | `.glb` | Draco-compressed files need a [`DracoDecoder`] |
//! | glTF | `.gltf` | External buffers resolved next to the file |
//! | Wavefront OBJ | `.obj` | Materials read from the sibling `.mtl` when present |
//!
//! # Usage
//!
//! ```no_run
//! use aina::io::{AssetLoader, FileLoader};
//!
//! let loader = FileLoader::new();
//! let model = loader.load("assets/models/male_trapezoid.glb".as_ref()).unwrap();
//! println!("{} triangles", model.num_triangles());
//! ```
//!
//! Optional decoders are injected when the loader is built, never detected at
//! load time:
//!
//! ```no_run
//! # use std::path::Path;
//! # use std::sync::Arc;
//! use aina::io::{DracoDecoder, FileLoader};
//! use aina::model::ModelData;
//!
//! struct MyDraco;
//!
//! impl DracoDecoder for MyDraco {
//!     fn decode(&self, path: &Path, bytes: &[u8]) -> aina::error::Result<ModelData> {
//!         unimplemented!()
//!     }
//! }
//!
//! let loader = FileLoader::new().with_draco(Arc::new(MyDraco));
//! ```

pub mod gltf;
pub mod obj;

use std::path::Path;
use std::sync::Arc;

use crate::error::{AinaError, Result};
use crate::model::ModelData;
use crate::resolve::AssetFormat;

/// Something that can turn an asset path into model geometry.
///
/// Loaders run on a background thread, so they must be `Send + Sync`.
pub trait AssetLoader: Send + Sync {
    /// Fetch and decode the model at `path`.
    fn load(&self, path: &Path) -> Result<ModelData>;
}

/// Decoder for glTF files that require `KHR_draco_mesh_compression`.
pub trait DracoDecoder: Send + Sync {
    /// Decode a complete Draco-compressed glTF/GLB file.
    fn decode(&self, path: &Path, bytes: &[u8]) -> Result<ModelData>;
}

/// Loads models from the local file system, dispatching on file extension.
#[derive(Clone, Default)]
pub struct FileLoader {
    draco: Option<Arc<dyn DracoDecoder>>,
}

impl FileLoader {
    /// Create a loader without optional decoders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable Draco-compressed glTF support.
    pub fn with_draco(mut self, decoder: Arc<dyn DracoDecoder>) -> Self {
        self.draco = Some(decoder);
        self
    }

    /// Whether Draco-compressed files can be decoded.
    pub fn has_draco(&self) -> bool {
        self.draco.is_some()
    }
}

impl std::fmt::Debug for FileLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLoader")
            .field("draco", &self.draco.is_some())
            .finish()
    }
}

impl AssetLoader for FileLoader {
    fn load(&self, path: &Path) -> Result<ModelData> {
        let format = AssetFormat::from_path(path).ok_or_else(|| AinaError::UnsupportedFormat {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
                .to_string(),
        })?;

        match format {
            AssetFormat::Glb => gltf::load_with(path, self.draco.as_deref()),
            AssetFormat::Obj => obj::load(path),
        }
    }
}

/// Load a model with automatic format detection and no optional decoders.
pub fn load<P: AsRef<Path>>(path: P) -> Result<ModelData> {
    FileLoader::new().load(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let err = load("model.fbx").unwrap_err();
        assert!(matches!(err, AinaError::UnsupportedFormat { ref extension } if extension == "fbx"));

        let err = load("model").unwrap_err();
        assert!(matches!(err, AinaError::UnsupportedFormat { .. }));
    }

    struct NullDraco;

    impl DracoDecoder for NullDraco {
        fn decode(&self, _path: &Path, _bytes: &[u8]) -> Result<ModelData> {
            Ok(ModelData::default())
        }
    }

    #[test]
    fn test_draco_capability() {
        assert!(!FileLoader::new().has_draco());
        assert!(FileLoader::new().with_draco(Arc::new(NullDraco)).has_draco());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load("/nonexistent/female_oval.glb").unwrap_err();
        assert!(matches!(err, AinaError::LoadError { .. }));
    }
}

//! glTF format support.
//!
//! This module loads models from glTF and GLB files. All meshes in the file
//! are merged into one [`ModelData`]; node transforms are not applied.

use std::fs;
use std::path::Path;

use nalgebra::{Point3, Vector3};

use super::DracoDecoder;
use crate::error::{AinaError, Result};
use crate::model::ModelData;

/// Extension name of Draco mesh compression.
pub const DRACO_EXTENSION: &str = "KHR_draco_mesh_compression";

/// Load a model from a glTF or GLB file.
///
/// Files that require Draco compression fail with
/// [`AinaError::CapabilityMissing`]; use [`load_with`] to supply a decoder.
///
/// # Example
///
/// ```no_run
/// use aina::io::gltf;
///
/// let model = gltf::load("assets/models/female_hourglass.glb").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<ModelData> {
    load_with(path.as_ref(), None)
}

/// Load a model from a glTF or GLB file, decoding Draco data with `draco` if needed.
pub fn load_with(path: &Path, draco: Option<&dyn DracoDecoder>) -> Result<ModelData> {
    let bytes = fs::read(path).map_err(|e| AinaError::load(path, e))?;

    let header = ::gltf::Gltf::from_slice_without_validation(&bytes)
        .map_err(|e| AinaError::load(path, e))?;
    let compressed = header
        .extensions_required()
        .any(|ext| ext == DRACO_EXTENSION);
    if compressed {
        return match draco {
            Some(decoder) => {
                log::debug!("Decoding Draco-compressed {}", path.display());
                decoder.decode(path, &bytes)
            }
            None => Err(AinaError::CapabilityMissing { capability: "draco" }),
        };
    }

    let (document, buffers, _images) =
        ::gltf::import(path).map_err(|e| AinaError::load(path, e))?;

    let mut model = ModelData::new();

    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let positions: Vec<Point3<f32>> = match reader.read_positions() {
                Some(iter) => iter.map(Point3::from).collect(),
                None => continue,
            };
            let normals: Vec<Vector3<f32>> = reader
                .read_normals()
                .map(|iter| iter.map(Vector3::from).collect())
                .unwrap_or_default();
            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            // Convert to triangles based on primitive mode
            let triangles = match primitive.mode() {
                ::gltf::mesh::Mode::Triangles => indices,
                ::gltf::mesh::Mode::TriangleStrip => strip_to_list(&indices),
                ::gltf::mesh::Mode::TriangleFan => fan_to_list(&indices),
                _ => {
                    // Skip non-triangle primitives (points, lines)
                    continue;
                }
            };

            if let Some(name) = primitive.material().name() {
                if !model.materials.iter().any(|m| m == name) {
                    model.materials.push(name.to_string());
                }
            }

            model.append(&positions, &normals, &triangles);
        }
    }

    if model.is_empty() {
        return Err(AinaError::EmptyModel {
            path: path.to_path_buf(),
        });
    }

    Ok(model)
}

fn strip_to_list(indices: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(indices.len().saturating_sub(2) * 3);
    for i in 0..indices.len().saturating_sub(2) {
        if i % 2 == 0 {
            out.extend_from_slice(&[indices[i], indices[i + 1], indices[i + 2]]);
        } else {
            // Reverse winding for odd triangles
            out.extend_from_slice(&[indices[i], indices[i + 2], indices[i + 1]]);
        }
    }
    out
}

fn fan_to_list(indices: &[u32]) -> Vec<u32> {
    let mut out = Vec::new();
    for i in 1..indices.len().saturating_sub(1) {
        out.extend_from_slice(&[indices[0], indices[i], indices[i + 1]]);
    }
    out
}

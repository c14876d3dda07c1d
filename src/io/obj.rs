//! Wavefront OBJ format support.
//!
//! Faces are triangulated on load. Materials come from the `.mtl` library the
//! OBJ references; a missing or unreadable library is logged and ignored.

use std::path::Path;

use nalgebra::{Point3, Vector3};

use crate::error::{AinaError, Result};
use crate::model::ModelData;

/// Load a model from an OBJ file and its material library.
///
/// # Example
///
/// ```no_run
/// use aina::io::obj;
///
/// let model = obj::load("assets/models/male_trapezoid.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<ModelData> {
    let path = path.as_ref();

    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, materials) =
        tobj::load_obj(path, &options).map_err(|e| AinaError::load(path, e))?;

    let mut model = ModelData::new();
    match materials {
        Ok(materials) => model.materials = materials.into_iter().map(|m| m.name).collect(),
        Err(e) => log::warn!("Ignoring materials for {}: {}", path.display(), e),
    }

    for m in models {
        let mesh = m.mesh;
        let positions: Vec<Point3<f32>> = mesh
            .positions
            .chunks_exact(3)
            .map(|p| Point3::new(p[0], p[1], p[2]))
            .collect();
        let normals: Vec<Vector3<f32>> = mesh
            .normals
            .chunks_exact(3)
            .map(|n| Vector3::new(n[0], n[1], n[2]))
            .collect();
        model.append(&positions, &normals, &mesh.indices);
    }

    if model.is_empty() {
        return Err(AinaError::EmptyModel {
            path: path.to_path_buf(),
        });
    }

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const QUAD: &str = "mtllib body.mtl\n\
        o body\n\
        v 0 0 0\n\
        v 1 0 0\n\
        v 1 3 0\n\
        v 0 3 0\n\
        usemtl denim\n\
        f 1 2 3 4\n";

    #[test]
    fn test_load_with_materials() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("body.mtl"), "newmtl denim\nKd 0.1 0.2 0.6\n").unwrap();
        let path = dir.path().join("female_rectangle.obj");
        fs::write(&path, QUAD).unwrap();

        let model = load(&path).unwrap();
        assert_eq!(model.num_vertices(), 4);
        assert_eq!(model.num_triangles(), 2);
        assert_eq!(model.materials, vec!["denim".to_string()]);
        assert_eq!(model.normals.len(), 4);
        assert_eq!(model.bounds().unwrap().size().y, 3.0);
    }

    #[test]
    fn test_missing_mtl_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("male_oval.obj");
        fs::write(&path, QUAD).unwrap();

        let model = load(&path).unwrap();
        assert_eq!(model.num_triangles(), 2);
        assert!(model.materials.is_empty());
    }

    #[test]
    fn test_no_faces_is_empty_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.obj");
        fs::write(&path, "v 0 0 0\nv 1 0 0\n").unwrap();
        assert!(matches!(load(&path).unwrap_err(), AinaError::EmptyModel { .. }));
    }
}

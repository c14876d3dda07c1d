//! CPU-side model geometry and viewport placement.
//!
//! Loaders in [`crate::io`] produce a [`ModelData`]: an indexed triangle list
//! with optional per-vertex normals. Before a model is shown it is placed
//! with [`Placement::fit`], which centers it horizontally, scales it to a
//! fixed height, and stands it on the floor plane.

use nalgebra::{Matrix4, Point3, Rotation3, Translation3, Vector3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f32>,
    /// Maximum corner.
    pub max: Point3<f32>,
}

impl Aabb {
    /// Compute the bounds of a set of points, or `None` if empty.
    pub fn from_points<'a, I>(points: I) -> Option<Aabb>
    where
        I: IntoIterator<Item = &'a Point3<f32>>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Aabb {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.min = bounds.min.inf(p);
            bounds.max = bounds.max.sup(p);
        }
        Some(bounds)
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Center point.
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Indexed triangle geometry ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelData {
    /// Vertex positions.
    pub positions: Vec<Point3<f32>>,
    /// Per-vertex normals; same length as `positions`.
    pub normals: Vec<Vector3<f32>>,
    /// Triangle list, three indices per face.
    pub indices: Vec<u32>,
    /// Names of the materials referenced by the model.
    pub materials: Vec<String>,
}

impl ModelData {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the model has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.len() < 3
    }

    /// Bounds of all vertex positions.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }

    /// Append a primitive. `indices` are relative to `positions`.
    ///
    /// When `normals` does not match `positions` in length, the primitive's
    /// normals are computed from its faces.
    pub fn append(
        &mut self,
        positions: &[Point3<f32>],
        normals: &[Vector3<f32>],
        indices: &[u32],
    ) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(positions);
        if normals.len() == positions.len() {
            self.normals.extend_from_slice(normals);
        } else {
            self.normals
                .extend(face_weighted_normals(positions, indices));
        }
        self.indices.extend(
            indices
                .chunks_exact(3)
                .filter(|tri| tri.iter().all(|&i| (i as usize) < positions.len()))
                .flatten()
                .map(|&i| i + offset),
        );
    }
}

/// Area-weighted vertex normals for one primitive.
fn face_weighted_normals(positions: &[Point3<f32>], indices: &[u32]) -> Vec<Vector3<f32>> {
    let mut normals = vec![Vector3::zeros(); positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        // Cross product length is twice the face area.
        let n = (positions[b] - positions[a]).cross(&(positions[c] - positions[a]));
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    for n in &mut normals {
        *n = n.try_normalize(1e-12).unwrap_or_else(Vector3::y);
    }
    normals
}

/// How a model sits in the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Uniform scale factor.
    pub scale: f32,
    /// Model-space point moved to the world origin before scaling: the
    /// horizontal center of the bounds at their lowest height.
    pub anchor: Point3<f32>,
    /// World height of the floor the model stands on.
    pub floor: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            scale: 1.0,
            anchor: Point3::origin(),
            floor: 0.0,
        }
    }
}

impl Placement {
    /// Scale the model to `target_height`, center it on the vertical axis,
    /// and put its lowest point at `-floor_offset`.
    ///
    /// A model with no height keeps scale 1.
    pub fn fit(bounds: &Aabb, target_height: f32, floor_offset: f32) -> Self {
        let height = bounds.size().y;
        let scale = if height > f32::EPSILON && target_height > 0.0 {
            target_height / height
        } else {
            1.0
        };
        let center = bounds.center();
        Self {
            scale,
            anchor: Point3::new(center.x, bounds.min.y, center.z),
            floor: -floor_offset,
        }
    }

    /// Model-to-world matrix with the model turned by `yaw` radians about the vertical axis.
    pub fn model_matrix(&self, yaw: f32) -> Matrix4<f32> {
        let lift = Translation3::new(0.0, self.floor, 0.0).to_homogeneous();
        let turn = Rotation3::from_axis_angle(&Vector3::y_axis(), yaw).to_homogeneous();
        let scale = Matrix4::new_scaling(self.scale);
        let recenter = Translation3::from(-self.anchor.coords).to_homogeneous();
        lift * turn * scale * recenter
    }

    /// Transform a model-space point to world space.
    pub fn transform_point(&self, p: &Point3<f32>, yaw: f32) -> Point3<f32> {
        self.model_matrix(yaw).transform_point(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tall_box() -> ModelData {
        let mut model = ModelData::new();
        let positions = [
            Point3::new(-1.0, 0.0, -1.0),
            Point3::new(1.0, 0.0, -1.0),
            Point3::new(1.0, 10.0, 3.0),
            Point3::new(-1.0, 10.0, 3.0),
        ];
        model.append(&positions, &[], &[0, 1, 2, 0, 2, 3]);
        model
    }

    #[test]
    fn test_bounds() {
        let model = tall_box();
        let bounds = model.bounds().unwrap();
        assert_eq!(bounds.min, Point3::new(-1.0, 0.0, -1.0));
        assert_eq!(bounds.max, Point3::new(1.0, 10.0, 3.0));
        assert_eq!(bounds.center(), Point3::new(0.0, 5.0, 1.0));
        assert!(ModelData::new().bounds().is_none());
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut model = tall_box();
        let tri = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        model.append(&tri, &[], &[0, 1, 2, 0, 1, 7]);
        assert_eq!(model.num_vertices(), 7);
        assert_eq!(model.num_triangles(), 3);
        assert_eq!(&model.indices[6..], &[4, 5, 6]);
        assert_eq!(model.normals.len(), 7);
        assert!((model.normals[4] - Vector3::z()).norm() < 1e-6);
    }

    #[test]
    fn test_fit_places_on_floor() {
        let model = tall_box();
        let placement = Placement::fit(&model.bounds().unwrap(), 2.8, 1.4);
        assert!((placement.scale - 0.28).abs() < 1e-6);

        let placed: Vec<_> = model
            .positions
            .iter()
            .map(|p| placement.transform_point(p, 0.0))
            .collect();
        let bounds = Aabb::from_points(&placed).unwrap();
        assert!((bounds.min.y + 1.4).abs() < 1e-5);
        assert!((bounds.max.y - 1.4).abs() < 1e-5);
        assert!(bounds.center().x.abs() < 1e-5);
        assert!(bounds.center().z.abs() < 1e-5);
    }

    #[test]
    fn test_yaw_keeps_height() {
        let model = tall_box();
        let placement = Placement::fit(&model.bounds().unwrap(), 2.5, 0.0);
        let top = placement.transform_point(&Point3::new(1.0, 10.0, 3.0), 1.3);
        assert!((top.y - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_flat_model_keeps_scale() {
        let bounds = Aabb {
            min: Point3::new(0.0, 1.0, 0.0),
            max: Point3::new(4.0, 1.0, 4.0),
        };
        let placement = Placement::fit(&bounds, 2.8, 1.4);
        assert_eq!(placement.scale, 1.0);
        let p = placement.transform_point(&Point3::new(2.0, 1.0, 2.0), 0.0);
        assert!((p - Point3::new(0.0, -1.4, 0.0)).norm() < 1e-6);
    }
}

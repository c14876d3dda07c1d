//! Orbit camera for the fitting-room viewer.

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Initial camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraPose {
    /// Point the camera looks at.
    pub target: [f32; 3],
    /// Distance from target.
    pub distance: f32,
    /// Horizontal angle (radians).
    pub azimuth: f32,
    /// Vertical angle (radians).
    pub elevation: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for CameraPose {
    /// Eye at `(0, 0.8, 5.5)` looking straight down -Z.
    fn default() -> Self {
        Self {
            target: [0.0, 0.8, 0.0],
            distance: 5.5,
            azimuth: 0.0,
            elevation: 0.0,
            fov_degrees: 45.0,
        }
    }
}

/// Camera looking at a target point from a fixed orbit position.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Target point to orbit around.
    pub target: Point3<f32>,
    /// Distance from target.
    pub distance: f32,
    /// Horizontal angle (radians).
    pub azimuth: f32,
    /// Vertical angle (radians).
    pub elevation: f32,
    /// Field of view in radians.
    pub fov: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
    /// Viewport width / height.
    pub aspect: f32,
    initial: CameraPose,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraPose::default())
    }
}

impl Camera {
    /// Create a camera at `pose`.
    pub fn new(pose: CameraPose) -> Self {
        Self {
            target: Point3::from(pose.target),
            distance: pose.distance,
            azimuth: pose.azimuth,
            elevation: pose.elevation,
            fov: pose.fov_degrees.to_radians(),
            near: 0.1,
            far: 100.0,
            aspect: 1.0,
            initial: pose,
        }
    }

    /// Get the camera's eye position in world space.
    pub fn eye_position(&self) -> Point3<f32> {
        let (sin_elev, cos_elev) = self.elevation.sin_cos();
        let (sin_azim, cos_azim) = self.azimuth.sin_cos();
        self.target
            + Vector3::new(
                self.distance * cos_elev * sin_azim,
                self.distance * sin_elev,
                self.distance * cos_elev * cos_azim,
            )
    }

    /// Get the view matrix (world to camera transform).
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye_position(), &self.target, &Vector3::y())
    }

    /// Get the projection matrix for the current aspect ratio.
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Perspective3::new(self.aspect.max(1e-3), self.fov, self.near, self.far).to_homogeneous()
    }

    /// Get combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Zoom the camera by the given factor.
    pub fn zoom(&mut self, factor: f32) {
        self.distance *= factor;
        self.distance = self.distance.clamp(0.5, 50.0);
    }

    /// Return to the pose the camera was created with.
    pub fn reset(&mut self) {
        let aspect = self.aspect;
        *self = Camera::new(self.initial);
        self.aspect = aspect;
    }

    /// Whether the viewport is taller than it is wide.
    pub fn is_portrait(&self) -> bool {
        self.aspect < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_eye() {
        let camera = Camera::default();
        let eye = camera.eye_position();
        assert!((eye - Point3::new(0.0, 0.8, 5.5)).norm() < 1e-6);
    }

    #[test]
    fn test_reset_restores_pose_but_keeps_aspect() {
        let mut camera = Camera::default();
        camera.aspect = 0.5;
        camera.zoom(0.5);
        assert_eq!(camera.distance, 2.75);

        camera.reset();
        assert_eq!(camera.azimuth, 0.0);
        assert_eq!(camera.elevation, 0.0);
        assert_eq!(camera.distance, 5.5);
        assert_eq!(camera.aspect, 0.5);
        assert!(camera.is_portrait());
    }

    #[test]
    fn test_target_projects_to_center() {
        let mut camera = Camera::default();
        camera.aspect = 16.0 / 9.0;
        let clip = camera.view_projection_matrix() * camera.target.to_homogeneous();
        let ndc = clip.xyz() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }
}

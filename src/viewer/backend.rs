//! Boundary between the viewer session and a rendering engine.

use nalgebra::Matrix4;
use thiserror::Error;

use super::camera::Camera;
use super::lights::LightRig;
use crate::model::ModelData;

/// Errors reported by a render backend.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The surface must be reconfigured before the next frame.
    #[error("render surface lost")]
    SurfaceLost,

    /// The backend ran out of memory.
    #[error("out of memory")]
    OutOfMemory,

    /// Any other backend failure.
    #[error("{0}")]
    Other(String),
}

/// The model drawn in a frame.
#[derive(Debug)]
pub struct FrameModel<'a, H> {
    /// Backend handle returned by [`RenderBackend::upload`].
    pub handle: &'a H,
    /// Model-to-world transform.
    pub transform: Matrix4<f32>,
}

/// Everything a backend needs to draw one frame.
#[derive(Debug)]
pub struct Frame<'a, H> {
    /// Viewing camera.
    pub camera: &'a Camera,
    /// Scene lighting.
    pub lights: &'a LightRig,
    /// Current model, if one is loaded.
    pub model: Option<FrameModel<'a, H>>,
}

/// A render surface able to hold uploaded models and draw frames.
pub trait RenderBackend {
    /// Backend-side resources of one uploaded model.
    type Handle;

    /// Upload model geometry, returning a handle that owns its GPU resources.
    fn upload(&mut self, model: &ModelData) -> Result<Self::Handle, RenderError>;

    /// Release every resource owned by `handle`.
    fn dispose(&mut self, handle: Self::Handle);

    /// Draw one frame.
    fn render(&mut self, frame: &Frame<'_, Self::Handle>) -> Result<(), RenderError>;

    /// Width / height of the surface.
    fn aspect(&self) -> f32;
}

//! Viewer options.

use serde::{Deserialize, Serialize};

use super::camera::CameraPose;
use crate::resolve::AssetSource;

/// Options for a [`ViewerSession`](super::ViewerSession).
///
/// Every field has a default, so a JSON config only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Where model files live and in which format.
    pub source: AssetSource,
    /// Model yaw change per pixel of horizontal drag (radians).
    pub drag_sensitivity: f32,
    /// Height models are scaled to on landscape surfaces.
    pub target_height: f32,
    /// Height models are scaled to on portrait surfaces.
    pub portrait_target_height: f32,
    /// Distance of the floor plane below the origin.
    pub floor_offset: f32,
    /// Initial camera placement, restored by reset.
    pub camera: CameraPose,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source: AssetSource::default(),
            drag_sensitivity: 0.008,
            target_height: 2.8,
            portrait_target_height: 2.5,
            floor_offset: 1.4,
            camera: CameraPose::default(),
        }
    }
}

impl ViewerConfig {
    /// Set the model source.
    pub fn with_source(mut self, source: AssetSource) -> Self {
        self.source = source;
        self
    }

    /// Set the drag sensitivity.
    pub fn with_drag_sensitivity(mut self, sensitivity: f32) -> Self {
        self.drag_sensitivity = sensitivity;
        self
    }

    /// Set the landscape and portrait target heights.
    pub fn with_target_heights(mut self, landscape: f32, portrait: f32) -> Self {
        self.target_height = landscape;
        self.portrait_target_height = portrait;
        self
    }

    /// Model height to use for a surface with the given aspect ratio.
    pub fn target_height_for(&self, aspect: f32) -> f32 {
        if aspect < 1.0 {
            self.portrait_target_height
        } else {
            self.target_height
        }
    }
}

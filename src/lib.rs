//! # Aina
//!
//! The engine behind a virtual fitting room: turn a user's body
//! measurements into a body-shape label, map that label to a 3D model, and
//! show the model in an interactive viewer.
//!
//! ## Pipeline
//!
//! - **Normalize**: profiles are entered in metric or imperial units and
//!   converted to centimetres and kilograms before anything is derived
//!   ([`units`], [`profile`]).
//! - **Classify**: ratio rules pick a gender-specific silhouette
//!   ([`classify::classify`]); a chest-only bucket is kept for the
//!   placeholder model set ([`classify::body_type`]).
//! - **Resolve**: gender and shape become an asset key such as
//!   `female_hourglass` ([`resolve`]).
//! - **View**: a [`viewer::ViewerSession`] loads the model in the background,
//!   places it on the floor, and lets the user turn it by dragging.
//!
//! ## Quick Start
//!
//! ```
//! use aina::prelude::*;
//!
//! let mut profile = UserProfile::for_gender(Gender::Female);
//! profile.set_field("hips", 104.0).unwrap();
//!
//! let shape = classify(&profile);
//! assert_eq!(shape, ShapeLabel::Triangle);
//!
//! let key = ResolverMode::Shape.resolve_profile(&profile);
//! assert_eq!(key.as_str(), "female_triangle");
//! ```
//!
//! ## Units
//!
//! Classification never depends on the display units:
//!
//! ```
//! use aina::prelude::*;
//!
//! let metric = UserProfile::for_gender(Gender::Male);
//! let imperial = convert_profile(&metric, UnitSystem::Metric, UnitSystem::Imperial);
//! assert_eq!(classify(&metric), classify(&imperial));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod classify;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod profile;
pub mod resolve;
pub mod storage;
pub mod units;
pub mod viewer;

/// Prelude module for convenient imports.
///
/// ```
/// use aina::prelude::*;
/// ```
pub mod prelude {
    pub use crate::classify::{body_type, classify, BodyType, ShapeLabel};
    pub use crate::error::{AinaError, Result};
    pub use crate::io::{AssetLoader, FileLoader};
    pub use crate::model::{ModelData, Placement};
    pub use crate::profile::{Gender, UserProfile};
    pub use crate::resolve::{resolve, AssetFormat, AssetKey, AssetSource, ResolverMode};
    pub use crate::units::{convert_profile, UnitSystem, WeightPolicy};
    pub use crate::viewer::{LoadOutcome, RenderBackend, ViewerConfig, ViewerSession};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

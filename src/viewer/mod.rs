//! Interactive 3D preview of the resolved model.
//!
//! A [`ViewerSession`] owns one render surface (any [`RenderBackend`]), the
//! camera, the light rig and at most one model. Models are fetched on
//! background threads through an [`AssetLoader`](crate::io::AssetLoader);
//! only the result of the most recent request is ever displayed.
//!
//! ```
//! use aina::viewer::{Frame, RenderBackend, RenderError, ViewerConfig, ViewerSession};
//! use aina::model::ModelData;
//! use aina::resolve::AssetKey;
//!
//! struct Headless;
//!
//! impl RenderBackend for Headless {
//!     type Handle = ();
//!     fn upload(&mut self, _: &ModelData) -> Result<(), RenderError> { Ok(()) }
//!     fn dispose(&mut self, _: ()) {}
//!     fn render(&mut self, _: &Frame<'_, ()>) -> Result<(), RenderError> { Ok(()) }
//!     fn aspect(&self) -> f32 { 16.0 / 9.0 }
//! }
//!
//! let mut session = ViewerSession::new(ViewerConfig::default(), None);
//! session.attach(Headless);
//! session.load(AssetKey::normalize("male_trapezoid"));
//! let outcomes = session.tick();
//! assert_eq!(outcomes.len(), 1);
//! ```

mod backend;
mod camera;
mod config;
mod interaction;
mod lights;
mod session;

pub use backend::{Frame, FrameModel, RenderBackend, RenderError};
pub use camera::{Camera, CameraPose};
pub use config::ViewerConfig;
pub use interaction::DragState;
pub use lights::{rgb, Light, LightKind, LightRig};
pub use session::{LoadOutcome, LoadRequest, LoadTicket, ModelInfo, Notice, ViewerSession};

//! The viewer session: one render surface, one current model.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::backend::{Frame, FrameModel, RenderBackend};
use super::camera::Camera;
use super::config::ViewerConfig;
use super::interaction::DragState;
use super::lights::LightRig;
use crate::error::{AinaError, Result};
use crate::io::AssetLoader;
use crate::model::{ModelData, Placement};
use crate::resolve::AssetKey;

/// Handle to a load started by [`ViewerSession::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    /// Request sequence number; later requests have larger numbers.
    pub seq: u64,
    /// Requested model.
    pub key: AssetKey,
}

/// A load that has begun and awaits its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Request sequence number.
    pub seq: u64,
    /// Requested model.
    pub key: AssetKey,
    /// File to fetch.
    pub path: PathBuf,
}

impl LoadRequest {
    /// The ticket identifying this request.
    pub fn ticket(&self) -> LoadTicket {
        LoadTicket {
            seq: self.seq,
            key: self.key.clone(),
        }
    }
}

/// How a load request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The model is now current.
    Loaded {
        /// Request sequence number.
        seq: u64,
        /// Loaded model.
        key: AssetKey,
    },
    /// Fetching, decoding or uploading failed; a notice was raised.
    Failed {
        /// Request sequence number.
        seq: u64,
        /// Requested model.
        key: AssetKey,
        /// Failure description.
        message: String,
    },
    /// A required loader or decoder is not available.
    Unavailable {
        /// Request sequence number.
        seq: u64,
        /// Requested model.
        key: AssetKey,
    },
    /// A newer request was made (or this one was cancelled); the result was discarded.
    Superseded {
        /// Request sequence number.
        seq: u64,
        /// Requested model.
        key: AssetKey,
    },
}

impl LoadOutcome {
    /// Sequence number of the request.
    pub fn seq(&self) -> u64 {
        match self {
            LoadOutcome::Loaded { seq, .. }
            | LoadOutcome::Failed { seq, .. }
            | LoadOutcome::Unavailable { seq, .. }
            | LoadOutcome::Superseded { seq, .. } => *seq,
        }
    }

    /// Requested model.
    pub fn key(&self) -> &AssetKey {
        match self {
            LoadOutcome::Loaded { key, .. }
            | LoadOutcome::Failed { key, .. }
            | LoadOutcome::Unavailable { key, .. }
            | LoadOutcome::Superseded { key, .. } => key,
        }
    }
}

/// A message for the user about something that went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Model the notice is about.
    pub key: AssetKey,
    /// Text to show.
    pub message: String,
}

/// Summary of the current model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    /// Model key.
    pub key: AssetKey,
    /// Rotation about the vertical axis (radians).
    pub yaw: f32,
    /// Viewport placement.
    pub placement: Placement,
    /// Number of triangles.
    pub triangles: usize,
}

struct Current<H> {
    key: AssetKey,
    handle: H,
    placement: Placement,
    yaw: f32,
    triangles: usize,
}

struct Completion {
    request: LoadRequest,
    result: Result<ModelData>,
}

/// Owns the render surface, camera, lights and the displayed model.
///
/// Loads follow a last-call-wins policy: every request gets a sequence
/// number, and a result is adopted only if no newer request has been made
/// since. The previous model is released as soon as a new load begins.
///
/// All methods run on the thread that owns the session; fetching and
/// decoding happen on background threads and are collected by [`poll`].
///
/// [`poll`]: ViewerSession::poll
pub struct ViewerSession<B: RenderBackend> {
    config: ViewerConfig,
    loader: Option<Arc<dyn AssetLoader>>,
    backend: Option<B>,
    camera: Camera,
    lights: LightRig,
    drag: DragState,
    current: Option<Current<B::Handle>>,
    staged: Option<(AssetKey, ModelData)>,
    latest_seq: u64,
    in_flight: Option<u64>,
    outstanding: usize,
    ready: Vec<LoadOutcome>,
    notices: Vec<Notice>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    frames: u64,
}

impl<B: RenderBackend> ViewerSession<B> {
    /// Create a session. Without a loader every load completes as
    /// [`LoadOutcome::Unavailable`].
    pub fn new(config: ViewerConfig, loader: Option<Arc<dyn AssetLoader>>) -> Self {
        if loader.is_none() {
            log::error!("No model loader available; models will not be displayed");
        }
        let (tx, rx) = mpsc::channel();
        Self {
            camera: Camera::new(config.camera),
            config,
            loader,
            backend: None,
            lights: LightRig::default(),
            drag: DragState::default(),
            current: None,
            staged: None,
            latest_seq: 0,
            in_flight: None,
            outstanding: 0,
            ready: Vec::new(),
            notices: Vec::new(),
            tx,
            rx,
            frames: 0,
        }
    }

    /// Attach the render surface. Returns `false` (and drops `backend`) if
    /// one is already attached.
    pub fn attach(&mut self, backend: B) -> bool {
        if self.backend.is_some() {
            log::debug!("Render surface already attached");
            return false;
        }
        self.camera.aspect = backend.aspect();
        self.backend = Some(backend);

        if let Some((key, data)) = self.staged.take() {
            if let Err(message) = self.adopt(key.clone(), data) {
                self.raise(key, message);
            }
        }
        true
    }

    /// Release the current model and hand the render surface back.
    pub fn detach(&mut self) -> Option<B> {
        self.release_current();
        self.backend.take()
    }

    /// Whether a render surface is attached.
    pub fn is_attached(&self) -> bool {
        self.backend.is_some()
    }

    /// The attached render surface.
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// The attached render surface, mutably.
    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }

    /// Session options.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// The viewing camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The light rig.
    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    /// Whether the most recent load is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Key of the model currently displayed (or waiting for a surface).
    pub fn current_key(&self) -> Option<&AssetKey> {
        match (&self.current, &self.staged) {
            (Some(current), _) => Some(&current.key),
            (None, Some((key, _))) => Some(key),
            (None, None) => None,
        }
    }

    /// Details of the displayed model.
    pub fn current_model(&self) -> Option<ModelInfo> {
        self.current.as_ref().map(|c| ModelInfo {
            key: c.key.clone(),
            yaw: c.yaw,
            placement: c.placement,
            triangles: c.triangles,
        })
    }

    /// Number of frames rendered successfully.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Drain user-visible notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Start loading `key` on a background thread.
    ///
    /// The outcome is reported by a later [`poll`](Self::poll),
    /// [`tick`](Self::tick) or [`wait_idle`](Self::wait_idle).
    pub fn load(&mut self, key: AssetKey) -> LoadTicket {
        let Some(loader) = self.loader.clone() else {
            self.latest_seq += 1;
            let ticket = LoadTicket {
                seq: self.latest_seq,
                key,
            };
            log::error!("Model loader unavailable; {} not loaded", ticket.key);
            self.ready.push(LoadOutcome::Unavailable {
                seq: ticket.seq,
                key: ticket.key.clone(),
            });
            return ticket;
        };

        let request = self.begin_load(key);
        let ticket = request.ticket();
        let tx = self.tx.clone();
        let job = request.clone();

        let spawned = thread::Builder::new()
            .name(format!("aina-load-{}", request.seq))
            .spawn(move || {
                let result = loader.load(&job.path);
                // The session may be gone; nothing to report to then.
                let _ = tx.send(Completion {
                    request: job,
                    result,
                });
            });

        match spawned {
            Ok(_) => self.outstanding += 1,
            Err(e) => {
                let outcome = self.complete_load(request, Err(AinaError::Io(e)));
                self.ready.push(outcome);
            }
        }
        ticket
    }

    /// Begin a load without fetching: releases the current model, marks the
    /// session as loading, and returns the request to complete later with
    /// [`complete_load`](Self::complete_load).
    pub fn begin_load(&mut self, key: AssetKey) -> LoadRequest {
        self.latest_seq += 1;
        self.release_current();
        self.in_flight = Some(self.latest_seq);

        let path = self.config.source.path_for(&key);
        log::info!("Loading: {}", path.display());
        LoadRequest {
            seq: self.latest_seq,
            key,
            path,
        }
    }

    /// Finish a request begun with [`begin_load`](Self::begin_load).
    ///
    /// Results of requests that are no longer the newest are discarded.
    pub fn complete_load(&mut self, request: LoadRequest, result: Result<ModelData>) -> LoadOutcome {
        let LoadRequest { seq, key, .. } = request;
        if seq != self.latest_seq || self.in_flight != Some(seq) {
            log::warn!("Discarding stale load #{} ({})", seq, key);
            return LoadOutcome::Superseded { seq, key };
        }
        self.in_flight = None;

        match result {
            Ok(data) => match self.adopt(key.clone(), data) {
                Ok(()) => {
                    log::info!("Model loaded: {}", key);
                    LoadOutcome::Loaded { seq, key }
                }
                Err(message) => self.fail(seq, key, message),
            },
            Err(AinaError::CapabilityMissing { capability }) => {
                log::error!("Cannot load {}: {} support missing", key, capability);
                LoadOutcome::Unavailable { seq, key }
            }
            Err(e) => self.fail(seq, key, e.to_string()),
        }
    }

    /// Cancel `ticket` if it is the outstanding request. Its result will be
    /// discarded as [`LoadOutcome::Superseded`].
    pub fn cancel(&mut self, ticket: &LoadTicket) -> bool {
        if self.in_flight == Some(ticket.seq) {
            self.in_flight = None;
            log::debug!("Cancelled load #{} ({})", ticket.seq, ticket.key);
            true
        } else {
            false
        }
    }

    /// Collect finished loads without blocking.
    pub fn poll(&mut self) -> Vec<LoadOutcome> {
        let mut outcomes = std::mem::take(&mut self.ready);
        while let Ok(completion) = self.rx.try_recv() {
            self.outstanding = self.outstanding.saturating_sub(1);
            outcomes.push(self.complete_load(completion.request, completion.result));
        }
        outcomes
    }

    /// Block until every background load has finished or `timeout` elapses.
    pub fn wait_idle(&mut self, timeout: Duration) -> Vec<LoadOutcome> {
        let deadline = Instant::now() + timeout;
        let mut outcomes = self.poll();
        while self.outstanding > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(completion) => {
                    self.outstanding -= 1;
                    outcomes.push(self.complete_load(completion.request, completion.result));
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        outcomes
    }

    /// One render-loop iteration: collect finished loads, then draw.
    ///
    /// Never fails; render errors are logged.
    pub fn tick(&mut self) -> Vec<LoadOutcome> {
        let outcomes = self.poll();
        self.render();
        outcomes
    }

    fn render(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        let model = self.current.as_ref().map(|c| FrameModel {
            handle: &c.handle,
            transform: c.placement.model_matrix(c.yaw),
        });
        let frame = Frame {
            camera: &self.camera,
            lights: &self.lights,
            model,
        };
        match backend.render(&frame) {
            Ok(()) => self.frames += 1,
            Err(e) => log::error!("Render error: {}", e),
        }
    }

    /// Pointer pressed at `(x, y)`.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.drag.press(x, y);
    }

    /// Pointer moved to `(x, y)`; turns the model while dragging.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some(dx) = self.drag.motion(x, y) else {
            return;
        };
        if let Some(current) = self.current.as_mut() {
            current.yaw += dx as f32 * self.config.drag_sensitivity;
        }
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) {
        self.drag.release();
    }

    /// Zoom the camera by `factor` (< 1 moves closer).
    pub fn zoom(&mut self, factor: f32) {
        self.camera.zoom(factor);
    }

    /// Restore the model's orientation and the camera pose. No-op without a model.
    pub fn reset(&mut self) {
        if let Some(current) = self.current.as_mut() {
            current.yaw = 0.0;
            self.camera.reset();
        }
    }

    /// The surface changed size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    fn adopt(&mut self, key: AssetKey, data: ModelData) -> std::result::Result<(), String> {
        let Some(bounds) = data.bounds() else {
            return Err("model has no vertices".to_string());
        };
        let Some(backend) = self.backend.as_mut() else {
            log::debug!("No render surface yet; staging {}", key);
            self.staged = Some((key, data));
            return Ok(());
        };

        let target_height = self.config.target_height_for(backend.aspect());
        let placement = Placement::fit(&bounds, target_height, self.config.floor_offset);
        let handle = backend.upload(&data).map_err(|e| e.to_string())?;

        self.current = Some(Current {
            key,
            handle,
            placement,
            yaw: 0.0,
            triangles: data.num_triangles(),
        });
        Ok(())
    }

    fn release_current(&mut self) {
        if let Some(current) = self.current.take() {
            if let Some(backend) = self.backend.as_mut() {
                backend.dispose(current.handle);
            }
            log::debug!("Released {}", current.key);
        }
        self.staged = None;
    }

    fn fail(&mut self, seq: u64, key: AssetKey, message: String) -> LoadOutcome {
        log::error!("Load error for {}: {}", key, message);
        self.raise(key.clone(), message.clone());
        LoadOutcome::Failed { seq, key, message }
    }

    fn raise(&mut self, key: AssetKey, message: String) {
        self.notices.push(Notice {
            message: format!("Failed to load {}: {}", key, message),
            key,
        });
    }
}

impl<B: RenderBackend> Drop for ViewerSession<B> {
    fn drop(&mut self) {
        self.release_current();
    }
}

//! Drawable management and presentation.
//!
//! [`Scene`] owns drawables through a [`PolylineBackend`]; [`reconcile`] matches them against a
//! curve's segments, [`update_geometry`] lays them out, and [`RenderScheduler`] decides when a
//! frame is actually presented.

pub(crate) mod backend;
pub(crate) mod export;
pub(crate) mod geometry;
pub(crate) mod path_backend;
pub(crate) mod pool;
pub(crate) mod scene;
pub(crate) mod scheduler;

pub use backend::{Polyline, PolylineBackend};
pub use export::{rasterize, render_png, to_svg};
pub use geometry::{PresentStats, hide_all, update_geometry};
pub use path_backend::{PathBackend, PathLine, PresentedFrame, Stroke};
pub use pool::{ReconcileStats, reconcile};
pub use scene::{DrawableId, Layer, Scene, SceneStats};
pub use scheduler::{DirtyReason, FrameClock, FrameDecision, RenderScheduler};

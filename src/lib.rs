//! Pitchline draws a reference and an editable pitch curve on a scrolling, zoomable timeline,
//! redrawing only what changed.
//!
//! The pipeline, leaf to root:
//!
//! - derive a dense per-frame pitch array ([`ReferenceRequest`], [`EditableRequest`])
//! - split it into [`PitchSegment`]s and key each by content ([`SegmentKey`])
//! - [`reconcile`] a curve's drawables against its segments, reusing freed ones
//! - lay drawables out through the [`Viewport`] and present at a capped rate
//!
//! [`PitchCanvas`] wires these together; [`ProjectSnapshot`] loads host state from JSON.
#![forbid(unsafe_code)]

mod foundation;

pub mod curve;
pub mod derive;
pub mod project;
pub mod render;
pub mod segment;
pub mod session;
pub mod timeline;

pub use crate::foundation::core::{
    BezPath, FrameRate, NO_PITCH, Point, Rgba8, Theme, ViewportSize, has_pitch,
};
pub use crate::foundation::error::{PitchError, PitchResult};
pub use crate::foundation::math::{freq_to_note, note_to_freq};

pub use crate::curve::{CurveKind, PitchLine};
pub use crate::derive::{
    AudioGuide, DeriveRequest, EditableRequest, PhonemeClass, PhonemeSpan, PreviewEdit,
    ReferenceRequest, derive_segments,
};
pub use crate::project::{ProjectSnapshot, TrackState, ViewState};
pub use crate::render::{
    DrawableId, PathBackend, Polyline, PolylineBackend, PresentStats, PresentedFrame,
    ReconcileStats, Scene, reconcile,
};
pub use crate::segment::{PitchPoint, PitchSegment, SegmentKey, SegmentMap};
pub use crate::session::{CanvasOpts, CurveFeed, FrameOutcome, GateOutcome, PitchCanvas};
pub use crate::timeline::{PixelAxis, TempoMap, TimeAxis, Viewport};

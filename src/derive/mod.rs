//! Producers of per-frame pitch arrays for the two curves.

pub(crate) mod editable;
pub(crate) mod phoneme;
pub(crate) mod reference;

pub use editable::{EditableRequest, PreviewEdit, apply_preview};
pub use phoneme::{PhonemeClass, PhonemeSpan, classify, voicing_mask};
pub use reference::{AudioGuide, ReferenceRequest, stitch_guides};

use crate::foundation::core::FrameRate;
use crate::foundation::error::PitchResult;
use crate::segment::{SegmentMap, build_segments, fingerprint_segments};
use crate::timeline::TempoMap;

/// Longest per-frame array a derivation pass will build (about 7.7 days at 100 fps).
pub const MAX_FRAMES: usize = 1 << 26;

/// A self-contained derivation input for one curve.
///
/// Requests own their data so a pass can run off the render thread.
pub trait DeriveRequest: Send {
    /// Dense per-frame values at [`DeriveRequest::frame_rate`], frame 0 at time 0.
    fn frame_values(&self) -> PitchResult<Vec<f64>>;
    /// Frame rate of [`DeriveRequest::frame_values`].
    fn frame_rate(&self) -> FrameRate;
    /// Tempo map for frame -> tick.
    fn tempo(&self) -> &TempoMap;
}

/// Run one full derivation pass: values -> segments -> fingerprinted map.
pub fn derive_segments<R: DeriveRequest + ?Sized>(request: &R) -> PitchResult<SegmentMap> {
    let values = request.frame_values()?;
    let segments = build_segments(&values, request.frame_rate(), request.tempo());
    Ok(fingerprint_segments(segments))
}

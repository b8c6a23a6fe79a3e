//! Per-frame arrays -> fingerprinted pitch segments.

pub(crate) mod builder;
pub(crate) mod fingerprint;

pub use builder::{
    MIN_SEGMENT_POINTS, PitchPoint, PitchSegment, build_segments, frame_to_tick, voiced_runs,
};
pub use fingerprint::{SegmentKey, SegmentMap, fingerprint_segment, fingerprint_segments};

use std::collections::HashMap;

use crate::foundation::core::Rgba8;
use crate::render::scene::{DrawableId, Layer};
use crate::segment::{PitchSegment, SegmentKey, SegmentMap};

/// Which of the two curves a [`PitchLine`] is.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    /// Pitch derived from audio guides; drawn behind.
    Reference,
    /// User-edited pitch; drawn in front.
    Editable,
}

impl CurveKind {
    /// Both curves, back to front.
    pub const ALL: [CurveKind; 2] = [CurveKind::Reference, CurveKind::Editable];

    /// Scene layer this curve's drawables live in.
    pub fn layer(self) -> Layer {
        match self {
            CurveKind::Reference => Layer::Reference,
            CurveKind::Editable => Layer::Editable,
        }
    }
}

/// A visual pitch layer: desired segments plus the drawables realizing them.
///
/// After [`crate::reconcile`] the drawable keys equal the segment keys exactly.
#[derive(Debug)]
pub struct PitchLine {
    kind: CurveKind,
    color: Rgba8,
    width: f32,
    segments: SegmentMap,
    drawables: HashMap<SegmentKey, DrawableId>,
}

impl PitchLine {
    /// Empty curve.
    pub fn new(kind: CurveKind, color: Rgba8, width: f32) -> Self {
        Self {
            kind,
            color,
            width,
            segments: SegmentMap::new(),
            drawables: HashMap::new(),
        }
    }

    /// Curve identity.
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Current stroke color.
    pub fn color(&self) -> Rgba8 {
        self.color
    }

    /// Fixed stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Change the stroke color. Returns `true` if it changed.
    pub fn set_color(&mut self, color: Rgba8) -> bool {
        if self.color == color {
            return false;
        }
        self.color = color;
        true
    }

    /// Desired state.
    pub fn segments(&self) -> &SegmentMap {
        &self.segments
    }

    /// Segment for `key`, if desired.
    pub fn segment(&self, key: &SegmentKey) -> Option<&PitchSegment> {
        self.segments.get(key)
    }

    /// Realized state.
    pub fn drawables(&self) -> &HashMap<SegmentKey, DrawableId> {
        &self.drawables
    }

    /// Replace the desired state wholesale; drawables are untouched until reconciliation.
    pub fn replace_segments(&mut self, segments: SegmentMap) {
        self.segments = segments;
    }

    /// `true` when every segment has a drawable and vice versa.
    pub fn is_reconciled(&self) -> bool {
        self.segments.len() == self.drawables.len()
            && self.segments.keys().all(|k| self.drawables.contains_key(k))
    }

    pub(crate) fn parts_mut(&mut self) -> (&SegmentMap, &mut HashMap<SegmentKey, DrawableId>) {
        (&self.segments, &mut self.drawables)
    }

    /// Drop both maps. Drawables must already be destroyed in the scene.
    pub(crate) fn release(&mut self) {
        self.segments.clear();
        self.drawables.clear();
    }
}

#[cfg(test)]
#[path = "../tests/unit/curve.rs"]
mod tests;

use std::ops::AddAssign;

use crate::curve::PitchLine;
use crate::foundation::core::Point;
use crate::foundation::error::{PitchError, PitchResult};
use crate::foundation::math::freq_to_note;
use crate::render::backend::{Polyline, PolylineBackend};
use crate::render::scene::Scene;
use crate::timeline::PixelAxis;

/// Visibility outcome of one geometry pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PresentStats {
    /// Drawables whose points were recomputed and which will render.
    pub visible: usize,
    /// Drawables rejected by horizontal culling or hidden outright.
    pub culled: usize,
}

impl AddAssign for PresentStats {
    fn add_assign(&mut self, rhs: Self) {
        self.visible += rhs.visible;
        self.culled += rhs.culled;
    }
}

/// Recompute pixel geometry for every drawable of `curve`.
///
/// A drawable whose segment lies entirely left of 0 or right of the axis width is hidden
/// before any per-point work. `scratch` is reused across calls to avoid reallocating.
pub fn update_geometry<B: PolylineBackend>(
    curve: &PitchLine,
    scene: &mut Scene<B>,
    axis: &dyn PixelAxis,
    scratch: &mut Vec<Point>,
) -> PitchResult<PresentStats> {
    let width = axis.width();
    let mut stats = PresentStats::default();

    for (key, &id) in curve.drawables() {
        let segment = curve.segment(key).ok_or_else(|| {
            PitchError::invariant(format!("drawable {id:?} has no segment {key}"))
        })?;
        let line = scene
            .get_mut(id)
            .ok_or_else(|| PitchError::invariant(format!("drawable {id:?} missing from scene")))?;

        let (first, last) = segment.tick_span();
        let x0 = axis.tick_to_x(first);
        let x1 = axis.tick_to_x(last);
        if x1 < 0.0 || x0 > width {
            line.set_visible(false);
            stats.culled += 1;
            continue;
        }

        scratch.clear();
        scratch.extend(
            segment
                .points()
                .iter()
                .map(|p| Point::new(axis.tick_to_x(p.tick), axis.note_to_y(freq_to_note(p.freq)))),
        );
        if line.capacity() < scratch.len() {
            line.resize(scratch.len());
        }
        line.set_points(scratch);
        line.set_visible(true);
        stats.visible += 1;
    }

    Ok(stats)
}

/// Hide every drawable of `curve` without touching its geometry.
pub fn hide_all<B: PolylineBackend>(curve: &PitchLine, scene: &mut Scene<B>) -> PitchResult<usize> {
    for &id in curve.drawables().values() {
        scene
            .get_mut(id)
            .ok_or_else(|| PitchError::invariant(format!("drawable {id:?} missing from scene")))?
            .set_visible(false);
    }
    Ok(curve.drawables().len())
}

#[cfg(test)]
#[path = "../../tests/unit/render/geometry.rs"]
mod tests;

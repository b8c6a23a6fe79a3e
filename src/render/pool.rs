use crate::curve::PitchLine;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{PitchError, PitchResult};
use crate::render::backend::{Polyline, PolylineBackend};
use crate::render::scene::{DrawableId, Scene};

/// What one reconciliation pass did to a curve's drawables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Drawables constructed because the free list was empty.
    pub created: usize,
    /// Freed drawables handed to a new segment.
    pub reused: usize,
    /// Drawables released without replacement: vanished with a stale style, or left over
    /// after reuse.
    pub destroyed: usize,
    /// Drawables destroyed because the curve's color changed; their rebuilds count as created.
    pub replaced: usize,
    /// Segments whose drawable was kept as is.
    pub unchanged: usize,
}

impl ReconcileStats {
    /// `true` when the pass touched no drawable.
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.reused == 0 && self.destroyed == 0 && self.replaced == 0
    }
}

fn matches_style<L: Polyline>(line: &L, color: Rgba8, width: f32) -> bool {
    line.color() == color && line.width() == width
}

/// Bring `curve`'s drawables in line with its segments.
///
/// Vanished drawables go to a free list, new segments take from it before anything is
/// constructed, and what is left of the list is destroyed at the end. On success the
/// drawable keys equal the segment keys.
///
/// A free-list drawable whose style does not match the curve is an invariant violation and
/// aborts the pass.
pub fn reconcile<B: PolylineBackend>(
    curve: &mut PitchLine,
    scene: &mut Scene<B>,
) -> PitchResult<ReconcileStats> {
    let mut free: Vec<DrawableId> = Vec::new();
    let result = reconcile_into(curve, scene, &mut free);

    let mut leftover = 0;
    for id in free {
        scene.destroy(id)?;
        leftover += 1;
    }

    let mut stats = result?;
    stats.destroyed += leftover;
    tracing::debug!(
        curve = ?curve.kind(),
        segments = curve.segments().len(),
        created = stats.created,
        reused = stats.reused,
        destroyed = stats.destroyed,
        replaced = stats.replaced,
        "reconciled curve"
    );
    Ok(stats)
}

fn reconcile_into<B: PolylineBackend>(
    curve: &mut PitchLine,
    scene: &mut Scene<B>,
    free: &mut Vec<DrawableId>,
) -> PitchResult<ReconcileStats> {
    let color = curve.color();
    let width = curve.width();
    let kind = curve.kind();
    let layer = kind.layer();
    let (segments, drawables) = curve.parts_mut();
    let mut stats = ReconcileStats::default();

    let vanished: Vec<_> = drawables
        .keys()
        .filter(|key| !segments.contains_key(key))
        .copied()
        .collect();
    for key in vanished {
        let Some(id) = drawables.remove(&key) else {
            continue;
        };
        scene.detach(id);
        let line = scene
            .get(id)
            .ok_or_else(|| PitchError::invariant(format!("drawable for segment {key} missing")))?;
        if matches_style(line, color, width) {
            free.push(id);
        } else {
            scene.destroy(id)?;
            stats.destroyed += 1;
        }
    }

    for (key, segment) in segments {
        if let Some(&id) = drawables.get(key) {
            let line = scene.get(id).ok_or_else(|| {
                PitchError::invariant(format!("drawable for segment {key} missing"))
            })?;
            if line.color() == color {
                stats.unchanged += 1;
                continue;
            }
            drawables.remove(key);
            scene.destroy(id)?;
            stats.replaced += 1;
        }

        let id = match free.pop() {
            Some(id) => {
                let Some(line) = scene.get_mut(id) else {
                    return Err(PitchError::invariant(format!(
                        "free drawable {id:?} missing from scene"
                    )));
                };
                if !matches_style(&*line, color, width) {
                    free.push(id);
                    return Err(PitchError::invariant(format!(
                        "pooled drawable {id:?} does not match the {kind:?} curve style"
                    )));
                }
                line.resize(segment.len());
                stats.reused += 1;
                id
            }
            None => {
                stats.created += 1;
                scene.create(segment.len(), color, width)
            }
        };
        scene.attach(id, layer)?;
        drawables.insert(*key, id);
    }

    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pool.rs"]
mod tests;

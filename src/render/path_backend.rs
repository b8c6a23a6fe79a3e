//! In-memory [`PolylineBackend`] that records each presented frame as kurbo paths.
//!
//! Used by the CLI for export and by tests to observe exactly what was drawn.

use crate::foundation::core::{BezPath, Point, Rgba8, ViewportSize};
use crate::foundation::error::PitchResult;
use crate::render::backend::{Polyline, PolylineBackend};

/// A polyline held as plain points.
#[derive(Clone, Debug)]
pub struct PathLine {
    capacity: usize,
    color: Rgba8,
    width: f32,
    visible: bool,
    points: Vec<Point>,
}

impl PathLine {
    /// Open path through the current points, or `None` with fewer than two.
    pub fn to_bez_path(&self) -> Option<BezPath> {
        let (first, rest) = self.points.split_first()?;
        if rest.is_empty() {
            return None;
        }
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        Some(path)
    }
}

impl Polyline for PathLine {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn resize(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.points.truncate(capacity);
    }

    fn color(&self) -> Rgba8 {
        self.color
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_points(&mut self, points: &[Point]) {
        let n = points.len().min(self.capacity);
        self.points.clear();
        self.points.extend_from_slice(&points[..n]);
    }

    fn points(&self) -> &[Point] {
        &self.points
    }
}

/// One stroked polyline of a [`PresentedFrame`].
#[derive(Clone, Debug)]
pub struct Stroke {
    pub path: BezPath,
    pub color: Rgba8,
    pub width: f32,
}

/// Everything the backend drew in one presentation, back to front.
#[derive(Clone, Debug, Default)]
pub struct PresentedFrame {
    pub size: Option<ViewportSize>,
    pub strokes: Vec<Stroke>,
}

impl PresentedFrame {
    pub fn width(&self) -> u32 {
        self.size.map_or(0, |s| s.width)
    }

    pub fn height(&self) -> u32 {
        self.size.map_or(0, |s| s.height)
    }
}

/// Counting, recording backend.
#[derive(Debug, Default)]
pub struct PathBackend {
    live: usize,
    created: u64,
    destroyed: u64,
    frames: u64,
    last_frame: PresentedFrame,
}

impl PathBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines created and not yet destroyed.
    pub fn live(&self) -> usize {
        self.live
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> &PresentedFrame {
        &self.last_frame
    }

    pub fn take_last_frame(&mut self) -> PresentedFrame {
        std::mem::take(&mut self.last_frame)
    }
}

impl PolylineBackend for PathBackend {
    type Line = PathLine;

    fn create_line(&mut self, capacity: usize, color: Rgba8, width: f32) -> PathLine {
        self.live += 1;
        self.created += 1;
        PathLine {
            capacity,
            color,
            width,
            visible: false,
            points: Vec::with_capacity(capacity),
        }
    }

    fn destroy_line(&mut self, _line: PathLine) {
        self.live = self.live.saturating_sub(1);
        self.destroyed += 1;
    }

    fn present(&mut self, size: ViewportSize, lines: &[&PathLine]) -> PitchResult<()> {
        let strokes = lines
            .iter()
            .filter_map(|line| {
                line.to_bez_path().map(|path| Stroke {
                    path,
                    color: line.color,
                    width: line.width,
                })
            })
            .collect();
        self.last_frame = PresentedFrame {
            size: Some(size),
            strokes,
        };
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/path_backend.rs"]
mod tests;

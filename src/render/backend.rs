use crate::foundation::core::{Point, Rgba8, ViewportSize};
use crate::foundation::error::PitchResult;

/// A retained polyline owned by a [`PolylineBackend`].
///
/// Capacity is the number of points the line can hold; `set_points` writes at most that many.
pub trait Polyline {
    fn capacity(&self) -> usize;

    /// Grow or shrink the point capacity. Existing points beyond the new capacity are dropped.
    fn resize(&mut self, capacity: usize);

    fn color(&self) -> Rgba8;

    fn width(&self) -> f32;

    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);

    /// Replace the point list. Callers pass at most `capacity()` points.
    fn set_points(&mut self, points: &[Point]);

    fn points(&self) -> &[Point];
}

/// Drawing surface that creates, destroys and presents polylines.
///
/// Color and width are fixed at creation; changing either means destroying the line and
/// creating a new one.
pub trait PolylineBackend {
    type Line: Polyline;

    fn create_line(&mut self, capacity: usize, color: Rgba8, width: f32) -> Self::Line;

    fn destroy_line(&mut self, line: Self::Line);

    /// Draw `lines` back to front into a surface of `size`.
    fn present(&mut self, size: ViewportSize, lines: &[&Self::Line]) -> PitchResult<()>;
}

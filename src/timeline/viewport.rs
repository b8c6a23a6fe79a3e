use crate::foundation::core::ViewportSize;
use crate::foundation::error::{PitchError, PitchResult};
use crate::timeline::PixelAxis;

/// Highest MIDI note drawn at the top edge (before vertical scroll).
pub const NOTE_MAX: f64 = 127.0;
/// Pixel height of one semitone at `zoom_y == 1`.
pub const DEFAULT_KEY_HEIGHT_PX: f64 = 12.0;

/// Zoom/scroll state of the piano-roll canvas.
///
/// `zoom_x` is pixels per tick, `zoom_y` scales [`DEFAULT_KEY_HEIGHT_PX`]. Offsets are in pixels
/// and grow rightwards/downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    size: ViewportSize,
    zoom_x: f64,
    zoom_y: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Viewport {
    /// Viewport with unit vertical zoom, `0.25 px/tick` and no scroll.
    pub fn new(size: ViewportSize) -> Self {
        Self {
            size,
            zoom_x: 0.25,
            zoom_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Current pixel size.
    pub fn size(&self) -> ViewportSize {
        self.size
    }

    /// Horizontal zoom (pixels per tick).
    pub fn zoom_x(&self) -> f64 {
        self.zoom_x
    }

    /// Vertical zoom factor.
    pub fn zoom_y(&self) -> f64 {
        self.zoom_y
    }

    /// Horizontal scroll in pixels.
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Vertical scroll in pixels.
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// Set both zoom factors. Rejects non-finite or non-positive values.
    pub fn set_zoom(&mut self, zoom_x: f64, zoom_y: f64) -> PitchResult<()> {
        for z in [zoom_x, zoom_y] {
            if !z.is_finite() || z <= 0.0 {
                return Err(PitchError::validation(format!("invalid zoom {z}")));
            }
        }
        self.zoom_x = zoom_x;
        self.zoom_y = zoom_y;
        Ok(())
    }

    /// Set absolute scroll offsets.
    pub fn set_offset(&mut self, offset_x: f64, offset_y: f64) -> PitchResult<()> {
        if !offset_x.is_finite() || !offset_y.is_finite() {
            return Err(PitchError::validation("scroll offset must be finite"));
        }
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        Ok(())
    }

    /// Scroll by a pixel delta.
    pub fn pan_by(&mut self, delta_x: f64, delta_y: f64) -> PitchResult<()> {
        self.set_offset(self.offset_x + delta_x, self.offset_y + delta_y)
    }

    /// Apply a container resize. Zero-sized updates are ignored and return `false`.
    pub fn resize(&mut self, size: ViewportSize) -> bool {
        if size.is_empty() || size == self.size {
            return false;
        }
        self.size = size;
        true
    }
}

impl PixelAxis for Viewport {
    fn tick_to_x(&self, tick: f64) -> f64 {
        tick * self.zoom_x - self.offset_x
    }

    fn note_to_y(&self, note: f64) -> f64 {
        (NOTE_MAX - note) * DEFAULT_KEY_HEIGHT_PX * self.zoom_y - self.offset_y
    }

    fn width(&self) -> f64 {
        f64::from(self.size.width)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/viewport.rs"]
mod tests;

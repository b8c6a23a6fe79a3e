//! Time and pixel conversions consumed by the pipeline.
//!
//! The pipeline only talks to these through [`TimeAxis`] and [`PixelAxis`]; [`TempoMap`] and
//! [`Viewport`] are the concrete implementations hosts usually hand in.

pub(crate) mod tempo;
pub(crate) mod viewport;

pub use tempo::{TempoChange, TempoMap};
pub use viewport::{DEFAULT_KEY_HEIGHT_PX, NOTE_MAX, Viewport};

/// Second <-> tick mapping under a tempo map.
pub trait TimeAxis {
    /// Timeline tick at `secs`.
    fn secs_to_tick(&self, secs: f64) -> f64;
    /// Seconds at timeline tick `tick`.
    fn tick_to_secs(&self, tick: f64) -> f64;
}

/// Tick/note -> pixel mapping under the current zoom and scroll offset.
pub trait PixelAxis {
    /// Horizontal pixel of `tick`.
    fn tick_to_x(&self, tick: f64) -> f64;
    /// Vertical pixel of fractional MIDI note `note`.
    fn note_to_y(&self, note: f64) -> f64;
    /// Drawable width in pixels; used for horizontal culling.
    fn width(&self) -> f64;
}

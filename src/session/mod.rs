//! Per-curve derivation serialization and the canvas that ties the pipeline together.

pub(crate) mod canvas;
pub(crate) mod feed;
pub(crate) mod gate;

pub use canvas::{CanvasOpts, CurvePalette, FrameOutcome, PitchCanvas, ThemeColors};
pub use feed::{CurveFeed, FeedStats};
pub use gate::{GateOutcome, SingleFlight};

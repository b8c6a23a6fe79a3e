use std::ops::Range;

use crate::foundation::core::{FrameRate, has_pitch};
use crate::timeline::TimeAxis;

/// Runs shorter than this cannot be drawn as a line.
pub const MIN_SEGMENT_POINTS: usize = 2;

/// One sample of a pitch curve in timeline space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PitchPoint {
    /// Timeline tick of the frame.
    pub tick: f64,
    /// Frequency in Hz.
    pub freq: f64,
}

/// A contiguous run of pitched frames, at least [`MIN_SEGMENT_POINTS`] long.
#[derive(Clone, Debug, PartialEq)]
pub struct PitchSegment {
    start_frame: usize,
    points: Vec<PitchPoint>,
}

impl PitchSegment {
    pub(crate) fn new(start_frame: usize, points: Vec<PitchPoint>) -> Self {
        debug_assert!(points.len() >= MIN_SEGMENT_POINTS);
        Self {
            start_frame,
            points,
        }
    }

    /// First frame index covered.
    pub fn start_frame(&self) -> usize {
        self.start_frame
    }

    /// Frames covered, half-open.
    pub fn frames(&self) -> Range<usize> {
        self.start_frame..self.start_frame + self.points.len()
    }

    /// Samples in frame order.
    pub fn points(&self) -> &[PitchPoint] {
        &self.points
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(first_tick, last_tick)`.
    pub fn tick_span(&self) -> (f64, f64) {
        let first = self.points.first().map_or(0.0, |p| p.tick);
        let last = self.points.last().map_or(first, |p| p.tick);
        (first, last)
    }
}

/// Maximal runs of pitched frames, in scan order, including single-frame runs.
pub fn voiced_runs(values: &[f64]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut open: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        match (open, has_pitch(v)) {
            (None, true) => open = Some(i),
            (Some(start), false) => {
                runs.push(start..i);
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        runs.push(start..values.len());
    }
    runs
}

/// Timeline tick at which frame `frame` starts.
pub fn frame_to_tick(axis: &dyn TimeAxis, rate: FrameRate, frame: usize) -> f64 {
    axis.secs_to_tick(rate.frames_to_secs(frame))
}

/// Split a dense per-frame array into renderable pitch segments.
///
/// Frame `i` of `values` sits at `i / rate` seconds. Runs shorter than
/// [`MIN_SEGMENT_POINTS`] are dropped; output order follows the scan.
pub fn build_segments(values: &[f64], rate: FrameRate, axis: &dyn TimeAxis) -> Vec<PitchSegment> {
    voiced_runs(values)
        .into_iter()
        .filter(|run| run.len() >= MIN_SEGMENT_POINTS)
        .map(|run| {
            let start = run.start;
            let points = run
                .map(|frame| PitchPoint {
                    tick: frame_to_tick(axis, rate, frame),
                    freq: values[frame],
                })
                .collect();
            PitchSegment::new(start, points)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/segment/builder.rs"]
mod tests;

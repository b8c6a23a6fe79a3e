use crate::derive::{DeriveRequest, MAX_FRAMES};
use crate::derive::phoneme::{PhonemeClass, PhonemeSpan, voicing_mask};
use crate::foundation::core::{FrameRate, NO_PITCH};
use crate::foundation::error::{PitchError, PitchResult};
use crate::timeline::TempoMap;

/// One audio-guide query result: the pitch track of a phrase as sung by a reference voice.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioGuide {
    /// Start of the guide on the timeline, in seconds.
    pub start_secs: f64,
    /// Frame rate of `frequencies`; must match the editor rate.
    pub frame_rate: FrameRate,
    /// Per-frame frequency in Hz.
    pub frequencies: Vec<f64>,
    /// Aligned phonemes; expands to exactly `frequencies.len()` frames.
    pub phonemes: Vec<PhonemeSpan>,
    /// Inactive guides are ignored.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl AudioGuide {
    /// Duration covered by the guide's frames.
    pub fn duration_secs(&self) -> f64 {
        self.frame_rate.frames_to_secs(self.frequencies.len())
    }

    /// `true` when `[start, end)` of the guide intersects `[span.0, span.1)`.
    pub fn overlaps(&self, span: (f64, f64)) -> bool {
        let end = self.start_secs + self.duration_secs();
        self.start_secs < span.1 && end > span.0
    }
}

/// Everything needed to derive the reference curve for the selected track.
#[derive(Clone, Debug)]
pub struct ReferenceRequest {
    /// Tempo map used for frame -> tick.
    pub tempo: TempoMap,
    /// Editor frame rate; every contributing guide must match it.
    pub editor_rate: FrameRate,
    /// Candidate guides, in any order.
    pub guides: Vec<AudioGuide>,
    /// Selected track extent in seconds; `None` accepts every guide.
    pub track_span: Option<(f64, f64)>,
}

impl DeriveRequest for ReferenceRequest {
    fn frame_values(&self) -> PitchResult<Vec<f64>> {
        stitch_guides(&self.guides, self.editor_rate, self.track_span)
    }

    fn frame_rate(&self) -> FrameRate {
        self.editor_rate
    }

    fn tempo(&self) -> &TempoMap {
        &self.tempo
    }
}

/// Stitch active, overlapping guides into one editor-rate frame array.
///
/// The array spans frame 0 to the furthest guide end; frames no guide covers and frames
/// under unvoiced phonemes stay [`NO_PITCH`]. Guides are applied in start order, so a later
/// guide wins where two overlap. A guide with a non-finite start, or one ending past
/// [`MAX_FRAMES`], makes the pass inconsistent.
#[tracing::instrument(skip(guides), fields(guides = guides.len()))]
pub fn stitch_guides(
    guides: &[AudioGuide],
    editor_rate: FrameRate,
    track_span: Option<(f64, f64)>,
) -> PitchResult<Vec<f64>> {
    let mut selected: Vec<&AudioGuide> = guides
        .iter()
        .filter(|g| g.active && track_span.is_none_or(|span| g.overlaps(span)))
        .collect();
    selected.sort_by(|a, b| a.start_secs.total_cmp(&b.start_secs));

    let mut out: Vec<f64> = Vec::new();
    for guide in selected {
        if !guide.frame_rate.same_rate(editor_rate) {
            return Err(PitchError::inconsistent(format!(
                "guide frame rate {}/{} does not match editor frame rate {}/{}",
                guide.frame_rate.num, guide.frame_rate.den, editor_rate.num, editor_rate.den
            )));
        }
        let mask = voicing_mask(&guide.phonemes)?;
        if mask.len() != guide.frequencies.len() {
            return Err(PitchError::inconsistent(format!(
                "phonemes cover {} frames but guide has {} frequency frames",
                mask.len(),
                guide.frequencies.len()
            )));
        }

        if !guide.start_secs.is_finite() {
            return Err(PitchError::inconsistent(format!(
                "guide start {} is not a finite time",
                guide.start_secs
            )));
        }
        let start = editor_rate.secs_to_frame_round(guide.start_secs);
        let end = start
            .checked_add(guide.frequencies.len() as i64)
            .filter(|&end| end <= MAX_FRAMES as i64)
            .ok_or_else(|| {
                PitchError::inconsistent(format!(
                    "guide starting at {}s ends past {MAX_FRAMES} frames",
                    guide.start_secs
                ))
            })?;
        if end <= 0 {
            continue;
        }
        let end = end as usize;
        if out.len() < end {
            out.resize(end, NO_PITCH);
        }
        for (i, (&freq, class)) in guide.frequencies.iter().zip(&mask).enumerate() {
            let frame = start + i as i64;
            if frame < 0 || *class == PhonemeClass::Unvoiced {
                continue;
            }
            out[frame as usize] = freq;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/derive/reference.rs"]
mod tests;

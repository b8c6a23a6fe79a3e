use crate::derive::{DeriveRequest, MAX_FRAMES};
use crate::foundation::core::{FrameRate, NO_PITCH};
use crate::foundation::error::{PitchError, PitchResult};
use crate::timeline::TempoMap;

/// An in-progress pitch edit that has not been committed to stored edit data.
///
/// Interpreted only by [`apply_preview`]; adding a variant must break that match.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreviewEdit {
    /// Overwrite frames `start_frame..start_frame + values.len()` with `values`.
    Draw {
        /// First frame written.
        start_frame: usize,
        /// Replacement values.
        values: Vec<f64>,
    },
    /// Reset frames `start_frame..start_frame + frame_count` to [`NO_PITCH`].
    Erase {
        /// First frame cleared.
        start_frame: usize,
        /// Number of frames cleared.
        frame_count: usize,
    },
}

/// Overlay `preview` on the stored edit data.
///
/// A draw past the end extends the array, filling the gap with [`NO_PITCH`]. An erase never
/// extends it; the part past the end is ignored. A draw reaching beyond [`MAX_FRAMES`] is
/// rejected.
pub fn apply_preview(stored: &[f64], preview: Option<&PreviewEdit>) -> PitchResult<Vec<f64>> {
    let mut out = stored.to_vec();
    let Some(preview) = preview else {
        return Ok(out);
    };
    match preview {
        PreviewEdit::Draw {
            start_frame,
            values,
        } => {
            let end = start_frame
                .checked_add(values.len())
                .filter(|&end| end <= MAX_FRAMES)
                .ok_or_else(|| {
                    PitchError::validation(format!(
                        "draw preview at frame {start_frame} with {} values exceeds {MAX_FRAMES} frames",
                        values.len()
                    ))
                })?;
            if out.len() < end {
                out.resize(end, NO_PITCH);
            }
            out[*start_frame..end].copy_from_slice(values);
        }
        PreviewEdit::Erase {
            start_frame,
            frame_count,
        } => {
            let end = start_frame.saturating_add(*frame_count).min(out.len());
            if *start_frame < end {
                out[*start_frame..end].fill(NO_PITCH);
            }
        }
    }
    Ok(out)
}

/// Everything needed to derive the editable curve for the selected track.
#[derive(Clone, Debug)]
pub struct EditableRequest {
    /// Tempo map used for frame -> tick.
    pub tempo: TempoMap,
    /// Editor frame rate of `stored`.
    pub editor_rate: FrameRate,
    /// Persisted per-frame pitch edits.
    pub stored: Vec<f64>,
    /// Optional uncommitted edit.
    pub preview: Option<PreviewEdit>,
}

impl DeriveRequest for EditableRequest {
    fn frame_values(&self) -> PitchResult<Vec<f64>> {
        apply_preview(&self.stored, self.preview.as_ref())
    }

    fn frame_rate(&self) -> FrameRate {
        self.editor_rate
    }

    fn tempo(&self) -> &TempoMap {
        &self.tempo
    }
}

#[cfg(test)]
#[path = "../../tests/unit/derive/editable.rs"]
mod tests;

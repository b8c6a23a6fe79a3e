//! Serializable snapshot of the host state the canvas consumes.
//!
//! A snapshot carries the tempo map, editor frame rate, tracks with their stored edits and
//! audio-guide results, the view (size, zoom, scroll) and the theme. It is what the CLI loads
//! and what tests use to drive the whole pipeline from JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::derive::{AudioGuide, EditableRequest, PreviewEdit, ReferenceRequest};
use crate::foundation::core::{FrameRate, Theme, ViewportSize};
use crate::foundation::error::{PitchError, PitchResult};
use crate::render::PolylineBackend;
use crate::session::{CanvasOpts, PitchCanvas};
use crate::timeline::{TempoChange, TempoMap};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProjectSnapshot {
    /// Pulses per quarter note.
    pub tpqn: u32,
    pub tempo: Vec<TempoChange>,
    pub editor_rate: FrameRate,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub view: ViewState,
    pub tracks: Vec<TrackState>,
    #[serde(default)]
    pub selected_track: usize,
    /// Uncommitted edit on the selected track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<PreviewEdit>,
    #[serde(default)]
    pub canvas: CanvasOpts,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackState {
    pub name: String,
    /// Voice assigned to the track. Without one nothing is drawn.
    #[serde(default)]
    pub singer: Option<String>,
    /// Stored per-frame edits; [`crate::NO_PITCH`] marks empty frames.
    #[serde(default)]
    pub pitch_edits: Vec<f64>,
    /// Track extent in seconds; guides outside it are ignored.
    #[serde(default)]
    pub span: Option<(f64, f64)>,
    #[serde(default)]
    pub guides: Vec<AudioGuide>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub width: u32,
    pub height: u32,
    pub zoom_x: f64,
    pub zoom_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 400,
            zoom_x: 0.25,
            zoom_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ViewState {
    pub fn size(&self) -> ViewportSize {
        ViewportSize {
            width: self.width,
            height: self.height,
        }
    }
}

impl ProjectSnapshot {
    /// Parse and validate a snapshot from JSON text.
    pub fn from_json_str(s: &str) -> PitchResult<Self> {
        let snapshot: Self =
            serde_json::from_str(s).map_err(|e| PitchError::serde(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Load and validate a snapshot from a JSON file.
    pub fn from_path(path: &Path) -> PitchResult<Self> {
        let f = File::open(path).with_context(|| format!("open project '{}'", path.display()))?;
        let snapshot: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| PitchError::serde(format!("{}: {e}", path.display())))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json_pretty(&self) -> PitchResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PitchError::serde(e.to_string()))
    }

    pub fn validate(&self) -> PitchResult<()> {
        self.tempo_map()?;
        self.editor_rate.validate()?;
        if self.view.size().is_empty() {
            return Err(PitchError::validation("view width/height must be > 0"));
        }
        for z in [self.view.zoom_x, self.view.zoom_y] {
            if !z.is_finite() || z <= 0.0 {
                return Err(PitchError::validation(format!("invalid view zoom {z}")));
            }
        }
        if self.canvas.max_fps == 0 {
            return Err(PitchError::validation("canvas max_fps must be > 0"));
        }
        if self.tracks.is_empty() {
            return Err(PitchError::validation("project has no tracks"));
        }
        self.selected()?;

        for track in &self.tracks {
            if let Some((start, end)) = track.span
                && (!start.is_finite() || !end.is_finite() || start > end)
            {
                return Err(PitchError::validation(format!(
                    "track '{}' span is invalid",
                    track.name
                )));
            }
            for guide in &track.guides {
                guide.frame_rate.validate()?;
                if !guide.start_secs.is_finite() {
                    return Err(PitchError::validation(format!(
                        "track '{}' has a guide with non-finite start {}",
                        track.name, guide.start_secs
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn tempo_map(&self) -> PitchResult<TempoMap> {
        TempoMap::new(self.tpqn, self.tempo.clone())
    }

    pub fn selected(&self) -> PitchResult<&TrackState> {
        self.tracks.get(self.selected_track).ok_or_else(|| {
            PitchError::validation(format!(
                "selected track {} out of range ({} tracks)",
                self.selected_track,
                self.tracks.len()
            ))
        })
    }

    /// `true` when the selected track has a non-empty singer.
    pub fn singer_present(&self) -> bool {
        self.selected()
            .ok()
            .and_then(|t| t.singer.as_deref())
            .is_some_and(|s| !s.trim().is_empty())
    }

    pub fn reference_request(&self) -> PitchResult<ReferenceRequest> {
        let track = self.selected()?;
        Ok(ReferenceRequest {
            tempo: self.tempo_map()?,
            editor_rate: self.editor_rate,
            guides: track.guides.clone(),
            track_span: track.span,
        })
    }

    pub fn editable_request(&self) -> PitchResult<EditableRequest> {
        let track = self.selected()?;
        Ok(EditableRequest {
            tempo: self.tempo_map()?,
            editor_rate: self.editor_rate,
            stored: track.pitch_edits.clone(),
            preview: self.preview.clone(),
        })
    }

    /// Build a canvas reflecting this snapshot and derive both curves into it.
    ///
    /// The derived segments are picked up on the canvas's next display frame.
    pub fn open_canvas<B: PolylineBackend>(&self, backend: B) -> PitchResult<PitchCanvas<B>> {
        let mut canvas = PitchCanvas::new(backend, self.view.size(), self.theme, self.canvas)?;
        canvas.set_zoom(self.view.zoom_x, self.view.zoom_y)?;
        canvas.set_offset(self.view.offset_x, self.view.offset_y)?;
        canvas.set_singer_present(self.singer_present());
        canvas.submit_reference(self.reference_request()?);
        canvas.submit_editable(self.editable_request()?);
        Ok(canvas)
    }
}

#[cfg(test)]
#[path = "../tests/unit/project.rs"]
mod tests;

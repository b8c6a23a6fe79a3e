use std::sync::Arc;
use std::time::Instant;

use crate::curve::{CurveKind, PitchLine};
use crate::derive::{EditableRequest, ReferenceRequest};
use crate::foundation::core::{Point, Rgba8, Theme, ViewportSize};
use crate::foundation::error::{PitchError, PitchResult};
use crate::render::{
    DirtyReason, FrameDecision, PolylineBackend, PresentStats, ReconcileStats, RenderScheduler,
    Scene, hide_all, reconcile, update_geometry,
};
use crate::segment::SegmentMap;
use crate::session::feed::CurveFeed;
use crate::session::gate::GateOutcome;
use crate::timeline::Viewport;

/// Curve colors for one theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ThemeColors {
    pub reference: Rgba8,
    pub editable: Rgba8,
}

/// Curve colors per theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CurvePalette {
    pub dark: ThemeColors,
    pub light: ThemeColors,
}

impl Default for CurvePalette {
    fn default() -> Self {
        Self {
            dark: ThemeColors {
                reference: Rgba8::rgba(170, 176, 190, 150),
                editable: Rgba8::rgb(255, 176, 64),
            },
            light: ThemeColors {
                reference: Rgba8::rgba(96, 102, 116, 150),
                editable: Rgba8::rgb(214, 96, 18),
            },
        }
    }
}

impl CurvePalette {
    pub fn color(&self, theme: Theme, kind: CurveKind) -> Rgba8 {
        let colors = match theme {
            Theme::Dark => self.dark,
            Theme::Light => self.light,
        };
        match kind {
            CurveKind::Reference => colors.reference,
            CurveKind::Editable => colors.editable,
        }
    }
}

/// Options for [`PitchCanvas::new`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CanvasOpts {
    /// Presentation rate cap.
    pub max_fps: u32,
    pub reference_width: f32,
    pub editable_width: f32,
    pub palette: CurvePalette,
}

impl Default for CanvasOpts {
    fn default() -> Self {
        Self {
            max_fps: 60,
            reference_width: 2.0,
            editable_width: 2.5,
            palette: CurvePalette::default(),
        }
    }
}

/// What [`PitchCanvas::on_display_frame`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    NotDue,
    Clean,
    Presented(PresentStats),
}

fn missing_scene() -> PitchError {
    PitchError::invariant("canvas scene is missing (already disposed?)")
}

/// The two-curve pitch canvas: derivation feeds, drawable pool, viewport and render loop.
///
/// Derivations run through the feeds (possibly on other threads); everything that touches
/// drawables runs on the owner's thread inside [`PitchCanvas::on_display_frame`].
pub struct PitchCanvas<B: PolylineBackend> {
    opts: CanvasOpts,
    scene: Option<Scene<B>>,
    reference: PitchLine,
    editable: PitchLine,
    reference_feed: Arc<CurveFeed<ReferenceRequest>>,
    editable_feed: Arc<CurveFeed<EditableRequest>>,
    scheduler: RenderScheduler,
    viewport: Viewport,
    theme: Theme,
    resync_pending: bool,
    singer_present: bool,
    last_reconcile: [ReconcileStats; 2],
    scratch: Vec<Point>,
}

impl<B: PolylineBackend> PitchCanvas<B> {
    pub fn new(backend: B, size: ViewportSize, theme: Theme, opts: CanvasOpts) -> PitchResult<Self> {
        if size.is_empty() {
            return Err(PitchError::validation(format!(
                "canvas size must be non-zero, got {}x{}",
                size.width, size.height
            )));
        }
        let palette = opts.palette;
        Ok(Self {
            opts,
            scene: Some(Scene::new(backend)),
            reference: PitchLine::new(
                CurveKind::Reference,
                palette.color(theme, CurveKind::Reference),
                opts.reference_width,
            ),
            editable: PitchLine::new(
                CurveKind::Editable,
                palette.color(theme, CurveKind::Editable),
                opts.editable_width,
            ),
            reference_feed: Arc::new(CurveFeed::new(CurveKind::Reference)),
            editable_feed: Arc::new(CurveFeed::new(CurveKind::Editable)),
            scheduler: RenderScheduler::new(opts.max_fps)?,
            viewport: Viewport::new(size),
            theme,
            resync_pending: false,
            singer_present: true,
            last_reconcile: [ReconcileStats::default(); 2],
            scratch: Vec::new(),
        })
    }

    pub fn opts(&self) -> &CanvasOpts {
        &self.opts
    }

    /// Handle for submitting reference derivations from another thread.
    pub fn reference_feed(&self) -> Arc<CurveFeed<ReferenceRequest>> {
        Arc::clone(&self.reference_feed)
    }

    /// Handle for submitting editable derivations from another thread.
    pub fn editable_feed(&self) -> Arc<CurveFeed<EditableRequest>> {
        Arc::clone(&self.editable_feed)
    }

    /// Derive the reference curve on the calling thread.
    pub fn submit_reference(&self, request: ReferenceRequest) -> GateOutcome {
        self.reference_feed.submit(request)
    }

    /// Derive the editable curve on the calling thread.
    pub fn submit_editable(&self, request: EditableRequest) -> GateOutcome {
        self.editable_feed.submit(request)
    }

    pub fn curve(&self, kind: CurveKind) -> &PitchLine {
        match kind {
            CurveKind::Reference => &self.reference,
            CurveKind::Editable => &self.editable,
        }
    }

    /// Stats of the most recent reconciliation of `kind`.
    pub fn last_reconcile(&self, kind: CurveKind) -> ReconcileStats {
        self.last_reconcile[kind as usize]
    }

    pub fn scene(&self) -> Option<&Scene<B>> {
        self.scene.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn singer_present(&self) -> bool {
        self.singer_present
    }

    pub fn is_dirty(&self) -> bool {
        self.scheduler.is_dirty()
    }

    pub fn is_disposed(&self) -> bool {
        self.scene.is_none()
    }

    /// Switch theme. Colors change now; drawables are rebuilt on the next frame.
    pub fn set_theme(&mut self, theme: Theme) {
        if theme == self.theme {
            return;
        }
        self.theme = theme;
        let palette = self.opts.palette;
        let mut changed = false;
        for curve in [&mut self.reference, &mut self.editable] {
            changed |= curve.set_color(palette.color(theme, curve.kind()));
        }
        if changed {
            self.resync_pending = true;
            self.scheduler.mark_dirty(DirtyReason::CurveColor);
        }
    }

    pub fn set_zoom(&mut self, zoom_x: f64, zoom_y: f64) -> PitchResult<()> {
        self.viewport.set_zoom(zoom_x, zoom_y)?;
        self.scheduler.mark_dirty(DirtyReason::Viewport);
        Ok(())
    }

    pub fn set_offset(&mut self, offset_x: f64, offset_y: f64) -> PitchResult<()> {
        self.viewport.set_offset(offset_x, offset_y)?;
        self.scheduler.mark_dirty(DirtyReason::Viewport);
        Ok(())
    }

    pub fn pan_by(&mut self, delta_x: f64, delta_y: f64) -> PitchResult<()> {
        self.viewport.pan_by(delta_x, delta_y)?;
        self.scheduler.mark_dirty(DirtyReason::Viewport);
        Ok(())
    }

    /// Follow a container resize. Zero-sized or unchanged sizes are ignored.
    pub fn resize(&mut self, size: ViewportSize) -> bool {
        let changed = self.viewport.resize(size);
        if changed {
            self.scheduler.mark_dirty(DirtyReason::Resize);
        }
        changed
    }

    /// Whether the selected track has a singer; without one nothing is drawn.
    pub fn set_singer_present(&mut self, present: bool) {
        if present != self.singer_present {
            self.singer_present = present;
            self.scheduler.mark_dirty(DirtyReason::SingerPresence);
        }
    }

    /// Collect finished derivations and reconcile every curve that changed or needs restyling.
    ///
    /// Both curves are synced even if one fails; the first error is returned and both are
    /// reconciled again on the next call.
    pub fn apply_pending(&mut self) -> PitchResult<()> {
        let scene = self.scene.as_mut().ok_or_else(missing_scene)?;
        let resync = std::mem::take(&mut self.resync_pending);

        let mut first_err = None;
        for kind in CurveKind::ALL {
            let (curve, ready) = match kind {
                CurveKind::Reference => (&mut self.reference, self.reference_feed.take_ready()),
                CurveKind::Editable => (&mut self.editable, self.editable_feed.take_ready()),
            };
            match sync_curve(curve, ready, resync, scene, &mut self.scheduler) {
                Ok(Some(stats)) => self.last_reconcile[kind as usize] = stats,
                Ok(None) => {}
                Err(err) => {
                    self.resync_pending = true;
                    first_err.get_or_insert(err);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Display-clock callback. Presents at most once per rate-cap interval, and only when dirty.
    pub fn on_display_frame(&mut self, now: Instant) -> PitchResult<FrameOutcome> {
        if self.scene.is_none() || !self.scheduler.is_running() {
            return Ok(FrameOutcome::NotDue);
        }
        self.apply_pending()?;
        match self.scheduler.begin_frame(now) {
            FrameDecision::NotDue => Ok(FrameOutcome::NotDue),
            FrameDecision::Clean => Ok(FrameOutcome::Clean),
            FrameDecision::Present => self.present_now().map(FrameOutcome::Presented),
        }
    }

    /// Lay out both curves and present unconditionally.
    pub fn present_now(&mut self) -> PitchResult<PresentStats> {
        let scene = self.scene.as_mut().ok_or_else(missing_scene)?;
        let mut stats = PresentStats::default();
        if self.singer_present {
            for curve in [&self.reference, &self.editable] {
                stats += update_geometry(curve, scene, &self.viewport, &mut self.scratch)?;
            }
        } else {
            for curve in [&self.reference, &self.editable] {
                stats.culled += hide_all(curve, scene)?;
            }
        }
        let drawn = scene.present(self.viewport.size())?;
        self.scheduler.finish_frame();
        tracing::debug!(
            visible = stats.visible,
            culled = stats.culled,
            drawn,
            "presented pitch canvas"
        );
        Ok(stats)
    }

    /// Release everything: stop the clock, destroy the scene and its drawables, clear both
    /// curves, and close the feeds. Safe to call more than once.
    pub fn dispose(&mut self) {
        self.scheduler.stop();
        if let Some(mut scene) = self.scene.take() {
            scene.destroy_all();
            tracing::debug!(
                created = scene.stats().created,
                destroyed = scene.stats().destroyed,
                "pitch canvas disposed"
            );
        }
        self.reference.release();
        self.editable.release();
        self.reference_feed.close();
        self.editable_feed.close();
    }

    /// Dispose and hand back the backend.
    pub fn into_backend(mut self) -> Option<B> {
        let scene = self.scene.take()?;
        self.dispose();
        Some(scene.into_backend())
    }
}

impl<B: PolylineBackend> Drop for PitchCanvas<B> {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn sync_curve<B: PolylineBackend>(
    curve: &mut PitchLine,
    ready: Option<SegmentMap>,
    resync: bool,
    scene: &mut Scene<B>,
    scheduler: &mut RenderScheduler,
) -> PitchResult<Option<ReconcileStats>> {
    let has_data = ready.is_some();
    if let Some(segments) = ready {
        curve.replace_segments(segments);
    }
    if !has_data && !resync {
        return Ok(None);
    }
    let stats = reconcile(curve, scene)?;
    if has_data {
        scheduler.mark_dirty(DirtyReason::Segments(curve.kind()));
    }
    Ok(Some(stats))
}

#[cfg(test)]
#[path = "../../tests/unit/session/canvas.rs"]
mod tests;

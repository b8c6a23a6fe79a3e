use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::curve::CurveKind;
use crate::derive::{DeriveRequest, derive_segments};
use crate::segment::SegmentMap;
use crate::session::gate::{GateOutcome, SingleFlight};

/// Counters of a [`CurveFeed`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Derivations that produced a segment map.
    pub passes: u64,
    /// Derivations that failed and were discarded.
    pub failures: u64,
    /// Requests overwritten while queued.
    pub dropped: u64,
}

/// Serialized derivation pipeline for one curve.
///
/// `submit` may be called from any thread. A successful pass parks its segment map in a
/// single ready slot that the render side collects with [`CurveFeed::take_ready`]; a newer
/// result replaces an uncollected one.
#[derive(Debug)]
pub struct CurveFeed<R> {
    kind: CurveKind,
    gate: SingleFlight<R>,
    ready: Mutex<Option<SegmentMap>>,
    passes: AtomicU64,
    failures: AtomicU64,
}

impl<R: DeriveRequest> CurveFeed<R> {
    pub fn new(kind: CurveKind) -> Self {
        Self {
            kind,
            gate: SingleFlight::new(),
            ready: Mutex::new(None),
            passes: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Run (or queue) a derivation pass for `request`.
    ///
    /// Errors are logged and swallowed; the curve keeps whatever it last derived.
    pub fn submit(&self, request: R) -> GateOutcome {
        self.gate.run(request, |req| self.derive_one(&req))
    }

    #[tracing::instrument(skip_all, fields(curve = ?self.kind))]
    fn derive_one(&self, request: &R) {
        match derive_segments(request) {
            Ok(segments) => {
                tracing::debug!(segments = segments.len(), "derivation ready");
                if !self.gate.is_closed() {
                    *self.ready.lock().unwrap_or_else(PoisonError::into_inner) = Some(segments);
                }
                self.passes.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(error = %err, "pitch derivation failed; keeping previous curve");
            }
        }
    }

    /// Collect the latest finished result, if any.
    pub fn take_ready(&self) -> Option<SegmentMap> {
        self.ready
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn has_ready(&self) -> bool {
        self.ready
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_in_flight()
    }

    /// Stop accepting requests and drop any uncollected result.
    pub fn close(&self) {
        self.gate.close();
        self.ready
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub fn is_closed(&self) -> bool {
        self.gate.is_closed()
    }

    pub fn stats(&self) -> FeedStats {
        FeedStats {
            passes: self.passes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            dropped: self.gate.dropped(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/feed.rs"]
mod tests;

use std::collections::BTreeMap;
use std::fmt;

use crate::segment::builder::PitchSegment;
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x5e9d_71c3_a2f0_4b86;

/// Content fingerprint of a [`PitchSegment`]; the segment's only identity across passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentKey {
    /// High 64 bits of the 128-bit digest.
    pub hi: u64,
    /// Low 64 bits of the 128-bit digest.
    pub lo: u64,
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Desired state of a curve: fingerprint -> segment.
pub type SegmentMap = BTreeMap<SegmentKey, PitchSegment>;

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_u64(&mut self, v: u64) {
        self.inner.update(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn finish(self) -> SegmentKey {
        let v = self.inner.digest128();
        SegmentKey {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

/// Hash the full `(tick, freq)` sequence of a segment.
///
/// The start frame is not hashed: two runs with identical samples are the same segment.
pub fn fingerprint_segment(segment: &PitchSegment) -> SegmentKey {
    let mut h = StableHasher::new();
    h.write_u64(segment.len() as u64);
    for p in segment.points() {
        h.write_f64(p.tick);
        h.write_f64(p.freq);
    }
    h.finish()
}

/// Key every segment by its fingerprint.
pub fn fingerprint_segments(segments: impl IntoIterator<Item = PitchSegment>) -> SegmentMap {
    segments
        .into_iter()
        .map(|s| (fingerprint_segment(&s), s))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/segment/fingerprint.rs"]
mod tests;

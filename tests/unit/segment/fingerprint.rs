use super::*;
use crate::segment::builder::PitchPoint;

fn seg(start: usize, samples: &[(f64, f64)]) -> PitchSegment {
    PitchSegment::new(
        start,
        samples
            .iter()
            .map(|&(tick, freq)| PitchPoint { tick, freq })
            .collect(),
    )
}

#[test]
fn fingerprint_is_deterministic_for_same_content() {
    let a = seg(3, &[(0.0, 440.0), (10.0, 441.0)]);
    let b = seg(3, &[(0.0, 440.0), (10.0, 441.0)]);
    assert_eq!(fingerprint_segment(&a), fingerprint_segment(&b));
    assert_eq!(fingerprint_segment(&a), fingerprint_segment(&a));
}

#[test]
fn fingerprint_changes_with_any_sample() {
    let base = fingerprint_segment(&seg(0, &[(0.0, 440.0), (10.0, 441.0)]));
    assert_ne!(base, fingerprint_segment(&seg(0, &[(0.0, 440.0), (10.0, 441.5)])));
    assert_ne!(base, fingerprint_segment(&seg(0, &[(0.0, 440.0), (10.5, 441.0)])));
    assert_ne!(
        base,
        fingerprint_segment(&seg(0, &[(0.0, 440.0), (10.0, 441.0), (20.0, 441.0)]))
    );
}

#[test]
fn fingerprint_depends_on_order() {
    let ab = seg(0, &[(0.0, 100.0), (1.0, 200.0)]);
    let ba = seg(0, &[(1.0, 200.0), (0.0, 100.0)]);
    assert_ne!(fingerprint_segment(&ab), fingerprint_segment(&ba));
}

#[test]
fn segment_map_keys_every_segment() {
    let segs: Vec<_> = (0..200)
        .map(|i| {
            let t = f64::from(i) * 100.0;
            seg(i as usize * 10, &[(t, 220.0), (t + 1.0, 221.0)])
        })
        .collect();
    let map = fingerprint_segments(segs);
    assert_eq!(map.len(), 200);
    for (key, s) in &map {
        assert_eq!(*key, fingerprint_segment(s));
    }
}

#[test]
fn display_is_32_hex_digits() {
    let key = fingerprint_segment(&seg(0, &[(0.0, 1.0), (1.0, 1.0)]));
    let s = key.to_string();
    assert_eq!(s.len(), 32);
    assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
}

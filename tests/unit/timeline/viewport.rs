use super::*;

fn vp() -> Viewport {
    Viewport::new(ViewportSize {
        width: 800,
        height: 600,
    })
}

#[test]
fn tick_to_x_applies_zoom_then_scroll() {
    let mut v = vp();
    v.set_zoom(0.5, 1.0).unwrap();
    v.set_offset(100.0, 0.0).unwrap();
    assert!((v.tick_to_x(480.0) - 140.0).abs() < 1e-9);
}

#[test]
fn higher_notes_are_higher_on_screen() {
    let v = vp();
    assert!(v.note_to_y(70.0) < v.note_to_y(60.0));
    assert!((v.note_to_y(NOTE_MAX)).abs() < 1e-9);
}

#[test]
fn pan_accumulates() {
    let mut v = vp();
    v.pan_by(10.0, -4.0).unwrap();
    v.pan_by(5.0, 0.0).unwrap();
    assert!((v.offset_x() - 15.0).abs() < 1e-9);
    assert!((v.offset_y() + 4.0).abs() < 1e-9);
}

#[test]
fn rejects_invalid_zoom_and_offsets() {
    let mut v = vp();
    assert!(v.set_zoom(0.0, 1.0).is_err());
    assert!(v.set_zoom(1.0, f64::NAN).is_err());
    assert!(v.set_offset(f64::INFINITY, 0.0).is_err());
    assert!((v.zoom_x() - 0.25).abs() < 1e-12);
}

#[test]
fn zero_sized_resize_is_ignored() {
    let mut v = vp();
    assert!(!v.resize(ViewportSize {
        width: 0,
        height: 10
    }));
    assert!(!v.resize(ViewportSize {
        width: 800,
        height: 600
    }));
    assert!(v.resize(ViewportSize {
        width: 1024,
        height: 600
    }));
    assert!((v.width() - 1024.0).abs() < 1e-9);
}

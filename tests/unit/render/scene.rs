use super::*;
use crate::foundation::core::Point;
use crate::render::path_backend::PathBackend;

const GREY: Rgba8 = Rgba8::rgb(128, 128, 128);

fn scene() -> Scene<PathBackend> {
    Scene::new(PathBackend::new())
}

#[test]
fn reference_inserts_below_and_editable_appends_above() {
    let mut s = scene();
    let r1 = s.create(2, GREY, 1.0);
    let r2 = s.create(2, GREY, 1.0);
    let e1 = s.create(2, GREY, 1.0);
    let e2 = s.create(2, GREY, 1.0);

    s.attach(e1, Layer::Editable).unwrap();
    s.attach(r1, Layer::Reference).unwrap();
    s.attach(e2, Layer::Editable).unwrap();
    s.attach(r2, Layer::Reference).unwrap();

    let order: Vec<_> = s.draw_order().collect();
    assert_eq!(order, vec![r2, r1, e1, e2]);
    assert_eq!(s.layer_of(r1), Some(Layer::Reference));
    assert_eq!(s.layer_of(e2), Some(Layer::Editable));
}

#[test]
fn detached_drawables_stay_alive_but_are_not_ordered() {
    let mut s = scene();
    let id = s.create(3, GREY, 1.0);
    s.attach(id, Layer::Editable).unwrap();
    assert!(s.detach(id));
    assert!(!s.detach(id));
    assert!(s.contains(id));
    assert_eq!(s.draw_order().count(), 0);
    assert_eq!(s.layer_of(id), None);
}

#[test]
fn destroying_twice_is_an_invariant_error() {
    let mut s = scene();
    let id = s.create(2, GREY, 1.0);
    s.destroy(id).unwrap();
    assert!(matches!(s.destroy(id), Err(PitchError::Invariant(_))));
    assert!(matches!(
        s.attach(id, Layer::Reference),
        Err(PitchError::Invariant(_))
    ));
    assert_eq!(s.stats().created, 1);
    assert_eq!(s.stats().destroyed, 1);
    assert_eq!(s.backend().live(), 0);
}

#[test]
fn present_draws_only_attached_visible_lines() {
    let mut s = scene();
    let shown = s.create(2, GREY, 1.0);
    let hidden = s.create(2, GREY, 1.0);
    let loose = s.create(2, GREY, 1.0);
    for id in [shown, hidden, loose] {
        let line = s.get_mut(id).unwrap();
        line.set_points(&[Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
        line.set_visible(true);
    }
    s.get_mut(hidden).unwrap().set_visible(false);
    s.attach(shown, Layer::Reference).unwrap();
    s.attach(hidden, Layer::Reference).unwrap();

    let size = ViewportSize {
        width: 10,
        height: 10,
    };
    assert_eq!(s.present(size).unwrap(), 1);
    assert_eq!(s.backend().last_frame().strokes.len(), 1);
    assert_eq!(s.stats().presented_frames, 1);
}

#[test]
fn destroy_all_releases_every_line() {
    let mut s = scene();
    for _ in 0..4 {
        let id = s.create(2, GREY, 1.0);
        s.attach(id, Layer::Editable).unwrap();
    }
    s.destroy_all();
    assert!(s.is_empty());
    assert_eq!(s.draw_order().count(), 0);
    assert_eq!(s.backend().live(), 0);
    assert_eq!(s.backend().destroyed(), 4);
}

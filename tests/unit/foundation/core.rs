use super::*;

#[test]
fn sentinel_and_non_positive_values_have_no_pitch() {
    assert!(!has_pitch(NO_PITCH));
    assert!(!has_pitch(0.0));
    assert!(!has_pitch(f64::NAN));
    assert!(!has_pitch(f64::INFINITY));
    assert!(has_pitch(440.0));
}

#[test]
fn frame_rate_rejects_zero_parts() {
    assert!(FrameRate::new(0, 1).is_err());
    assert!(FrameRate::new(100, 0).is_err());
    assert!(FrameRate::new(100, 1).is_ok());
}

#[test]
fn frame_rate_compares_by_value() {
    let a = FrameRate::new(100, 1).unwrap();
    let b = FrameRate::new(200, 2).unwrap();
    let c = FrameRate::new(30000, 1001).unwrap();
    assert!(a.same_rate(b));
    assert!(!a.same_rate(c));
}

#[test]
fn frame_rate_secs_roundtrip() {
    let fps = FrameRate::new(100, 1).unwrap();
    assert!((fps.frames_to_secs(250) - 2.5).abs() < 1e-12);
    assert_eq!(fps.secs_to_frame_round(2.5), 250);
    assert_eq!(fps.secs_to_frame_round(-0.02), -2);
    assert_eq!(fps.frames_covering(0.015), 2);
}

#[test]
fn rgba_hex_drops_alpha() {
    assert_eq!(Rgba8::rgba(255, 16, 0, 128).to_css_hex(), "#ff1000");
    assert!((Rgba8::rgb(0, 0, 0).alpha_f32() - 1.0).abs() < f32::EPSILON);
}

#[test]
fn theme_toggle_and_serde_names() {
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
}

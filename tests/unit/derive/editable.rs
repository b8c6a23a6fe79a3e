use super::*;

const S: f64 = NO_PITCH;

#[test]
fn no_preview_returns_stored_data() {
    assert_eq!(apply_preview(&[1.0, S, 2.0], None).unwrap(), vec![1.0, S, 2.0]);
}

#[test]
fn draw_past_end_extends_with_sentinel() {
    let preview = PreviewEdit::Draw {
        start_frame: 5,
        values: vec![220.0, 220.0, 220.0],
    };
    let out = apply_preview(&[100.0, 100.0, 100.0], Some(&preview)).unwrap();
    assert_eq!(out.len(), 8);
    assert_eq!(&out[..3], &[100.0, 100.0, 100.0]);
    assert_eq!(&out[3..5], &[S, S]);
    assert_eq!(&out[5..], &[220.0, 220.0, 220.0]);
}

#[test]
fn draw_with_overflowing_extent_is_rejected() {
    let preview = PreviewEdit::Draw {
        start_frame: usize::MAX,
        values: vec![220.0],
    };
    assert!(matches!(
        apply_preview(&[100.0], Some(&preview)),
        Err(PitchError::Validation(_))
    ));

    let far = PreviewEdit::Draw {
        start_frame: MAX_FRAMES,
        values: vec![220.0, 220.0],
    };
    assert!(apply_preview(&[100.0], Some(&far)).is_err());
}

#[test]
fn erase_with_huge_count_still_clamps() {
    let preview = PreviewEdit::Erase {
        start_frame: 1,
        frame_count: usize::MAX,
    };
    assert_eq!(
        apply_preview(&[1.0, 1.0, 1.0], Some(&preview)).unwrap(),
        vec![1.0, S, S]
    );
}

#[test]
fn overflowing_preview_fails_the_request() {
    let request = EditableRequest {
        tempo: TempoMap::constant(480, 120.0).unwrap(),
        editor_rate: FrameRate::new(100, 1).unwrap(),
        stored: vec![100.0, 100.0],
        preview: Some(PreviewEdit::Draw {
            start_frame: usize::MAX - 1,
            values: vec![1.0, 1.0, 1.0],
        }),
    };
    assert!(matches!(
        request.frame_values(),
        Err(PitchError::Validation(_))
    ));
}

#[test]
fn draw_inside_overwrites_only_its_range() {
    let preview = PreviewEdit::Draw {
        start_frame: 1,
        values: vec![7.0, 8.0],
    };
    let out = apply_preview(&[1.0, 2.0, 3.0, 4.0], Some(&preview)).unwrap();
    assert_eq!(out, vec![1.0, 7.0, 8.0, 4.0]);
}

#[test]
fn erase_resets_range_to_sentinel() {
    let preview = PreviewEdit::Erase {
        start_frame: 2,
        frame_count: 3,
    };
    let out = apply_preview(&[100.0; 5], Some(&preview)).unwrap();
    assert_eq!(out, vec![100.0, 100.0, S, S, S]);
}

#[test]
fn erase_past_end_does_not_extend() {
    let preview = PreviewEdit::Erase {
        start_frame: 3,
        frame_count: 10,
    };
    assert_eq!(
        apply_preview(&[1.0, 1.0, 1.0, 1.0], Some(&preview)).unwrap(),
        vec![1.0, 1.0, 1.0, S]
    );
    let beyond = PreviewEdit::Erase {
        start_frame: 9,
        frame_count: 2,
    };
    assert_eq!(apply_preview(&[1.0], Some(&beyond)).unwrap(), vec![1.0]);
}

#[test]
fn preview_json_is_tagged() {
    let p: PreviewEdit =
        serde_json::from_str(r#"{"kind":"erase","start_frame":2,"frame_count":3}"#).unwrap();
    assert_eq!(
        p,
        PreviewEdit::Erase {
            start_frame: 2,
            frame_count: 3
        }
    );
    assert!(serde_json::from_str::<PreviewEdit>(r#"{"kind":"smooth","start_frame":0}"#).is_err());
}

use super::*;
use crate::foundation::core::{BezPath, Point, ViewportSize};
use crate::render::path_backend::Stroke;

fn frame(width: u32, height: u32) -> PresentedFrame {
    let mut path = BezPath::new();
    path.move_to(Point::new(0.0, 5.0));
    path.line_to(Point::new(20.0, 5.0));
    PresentedFrame {
        size: Some(ViewportSize { width, height }),
        strokes: vec![Stroke {
            path,
            color: Rgba8::rgb(255, 0, 0),
            width: 4.0,
        }],
    }
}

fn pixel(data: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [data[i], data[i + 1], data[i + 2], data[i + 3]]
}

#[test]
fn svg_contains_one_path_per_stroke() {
    let svg = to_svg(&frame(20, 10), Some(Rgba8::rgb(0, 0, 0)));
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<path ").count(), 1);
    assert!(svg.contains(r##"stroke="#ff0000""##));
    assert!(svg.contains(r##"fill="#000000""##));
    assert!(svg.contains(r#" d="M"#));
    assert!(svg.ends_with("</svg>\n"));
    assert_eq!(svg.lines().count(), 4);
}

#[test]
fn transparent_svg_has_no_background_rect() {
    let svg = to_svg(&frame(20, 10), None);
    assert!(!svg.contains("<rect"));
    assert_eq!(svg.lines().count(), 3);
}

#[test]
fn rasterized_stroke_lands_on_its_row() {
    let data = rasterize(&frame(20, 10), None).unwrap();
    assert_eq!(data.len(), 20 * 10 * 4);
    assert_eq!(pixel(&data, 20, 10, 5), [255, 0, 0, 255]);
    assert_eq!(pixel(&data, 20, 10, 0)[3], 0);
}

#[test]
fn background_fills_untouched_pixels() {
    let data = rasterize(&frame(20, 10), Some(Rgba8::rgb(0, 0, 255))).unwrap();
    assert_eq!(pixel(&data, 20, 10, 9), [0, 0, 255, 255]);
}

#[test]
fn empty_frame_cannot_be_rasterized() {
    assert!(rasterize(&PresentedFrame::default(), None).is_err());
}

#[test]
fn png_is_written_to_disk() {
    let path = std::env::temp_dir().join(format!("pitchline-export-{}.png", std::process::id()));
    render_png(&frame(20, 10), None, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
    let _ = std::fs::remove_file(&path);
}

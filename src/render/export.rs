use std::path::Path;

use anyhow::Context;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{PitchError, PitchResult};
use crate::render::path_backend::PresentedFrame;

/// Serialize a presented frame as a standalone SVG document.
pub fn to_svg(frame: &PresentedFrame, background: Option<Rgba8>) -> String {
    let (w, h) = (frame.width(), frame.height());
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
    );
    if let Some(bg) = background {
        out.push_str(&format!(
            "  <rect width=\"{w}\" height=\"{h}\" fill=\"{}\" fill-opacity=\"{}\"/>\n",
            bg.to_css_hex(),
            bg.alpha_f32()
        ));
    }
    for stroke in &frame.strokes {
        out.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>\n",
            stroke.path.to_svg(),
            stroke.color.to_css_hex(),
            stroke.color.alpha_f32(),
            stroke.width
        ));
    }
    out.push_str("</svg>\n");
    out
}

/// Rasterize a presented frame to straight-alpha RGBA8 rows.
pub fn rasterize(frame: &PresentedFrame, background: Option<Rgba8>) -> PitchResult<Vec<u8>> {
    let (w, h) = (frame.width(), frame.height());
    let svg = to_svg(frame, background);
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse exported svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| PitchError::validation(format!("cannot rasterize a {w}x{h} frame")))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    let mut data = Vec::with_capacity(w as usize * h as usize * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(data)
}

/// Rasterize a presented frame and write it as PNG.
#[tracing::instrument(skip(frame), fields(strokes = frame.strokes.len()))]
pub fn render_png(
    frame: &PresentedFrame,
    background: Option<Rgba8>,
    path: &Path,
) -> PitchResult<()> {
    let data = rasterize(frame, background)?;
    image::save_buffer_with_format(
        path,
        &data,
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;

//! Rasterizer - sized SVG to PNG data URI
//!
//! The drawing surface is reached through [`ImageRenderer`] so the transform
//! core can be exercised without one. [`ResvgRenderer`] is the built-in
//! surface.

use base64::Engine;
use resvg::usvg::{Options, Tree};
use thiserror::Error;
use tiny_skia::{Pixmap, Transform};

use crate::dimensions::set_svg_size;

pub const SVG_MIME: &str = "image/svg+xml;charset=utf-8";
pub const PNG_MIME: &str = "image/png";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to render SVG: {0}")]
    RenderFailure(String),

    #[error("Rendering surface unavailable: {0}")]
    ContextUnavailable(String),
}

/// Owned SVG bytes handed to a renderer for the duration of one call
#[derive(Debug)]
pub struct SvgPayload {
    data: Vec<u8>,
}

impl SvgPayload {
    pub fn new(svg: &str) -> Self {
        Self { data: svg.as_bytes().to_vec() }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A surface that decodes SVG and produces PNG bytes.
pub trait ImageRenderer {
    fn render(&self, payload: &SvgPayload, size: u32) -> Result<Vec<u8>, RenderError>;
}

/// Resize `svg` to `size`, rasterize it and return a `data:image/png` URI.
///
/// The payload lives in this frame, so it is released whether the renderer
/// succeeds or fails.
pub fn svg_to_png_data_uri(
    renderer: &dyn ImageRenderer,
    svg: &str,
    size: u32,
) -> Result<String, RenderError> {
    let payload = SvgPayload::new(&set_svg_size(svg, size));
    let png = renderer.render(&payload, size)?;
    Ok(to_data_uri(PNG_MIME, &png))
}

pub fn to_data_uri(mime: &str, data: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(data)
    )
}

/// CPU renderer backed by `resvg`
#[derive(Default)]
pub struct ResvgRenderer {
    options: Options<'static>,
}

impl ResvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImageRenderer for ResvgRenderer {
    fn render(&self, payload: &SvgPayload, size: u32) -> Result<Vec<u8>, RenderError> {
        let mut pixmap = Pixmap::new(size, size).ok_or_else(|| {
            RenderError::ContextUnavailable(format!("cannot allocate a {size}x{size} surface"))
        })?;

        let tree = Tree::from_data(payload.data(), &self.options)
            .map_err(|e| RenderError::RenderFailure(e.to_string()))?;

        // Fit the drawing into the square, keeping its aspect ratio, centered
        let svg_size = tree.size();
        let scale = (size as f32 / svg_size.width()).min(size as f32 / svg_size.height());
        let offset_x = (size as f32 - svg_size.width() * scale) / 2.0;
        let offset_y = (size as f32 - svg_size.height() * scale) / 2.0;
        let transform = Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);

        resvg::render(&tree, transform, &mut pixmap.as_mut());
        tracing::debug!(size, "rasterized svg");

        pixmap
            .encode_png()
            .map_err(|e| RenderError::RenderFailure(e.to_string()))
    }
}

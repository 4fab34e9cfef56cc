use resvg::{tiny_skia, usvg};

use crate::error::RenderError;

/// Longest edge of the editor preview raster, in pixels. Small graphics are
/// upscaled toward this so flat icons stay inspectable.
pub const PREVIEW_BOX: f32 = 768.0;

const MIN_SCALE: f32 = 0.05;
const MAX_SCALE: f32 = 8.0;

/// A PNG-encoded raster of one SVG document plus its pixel dimensions.
#[derive(Debug, Clone)]
pub struct RenderedSvg {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Scale factor that fits `width` x `height` inside a `max_edge` square,
/// clamped so degenerate document sizes cannot produce runaway pixmaps.
pub fn fit_scale(width: f32, height: f32, max_edge: f32) -> f32 {
    let longest = width.max(height).max(1.0);
    (max_edge / longest).clamp(MIN_SCALE, MAX_SCALE)
}

/// Rasterize SVG text at a fixed scale and encode the result as PNG.
pub fn rasterize(svg: &str, scale: f32) -> Result<RenderedSvg, RenderError> {
    let tree = parse(svg)?;
    render_tree(&tree, scale)
}

/// Rasterize SVG text scaled to fit inside a `max_edge` square.
pub fn rasterize_to_fit(svg: &str, max_edge: f32) -> Result<RenderedSvg, RenderError> {
    let tree = parse(svg)?;
    let size = tree.size();
    let scale = fit_scale(size.width(), size.height(), max_edge);
    render_tree(&tree, scale)
}

fn parse(svg: &str) -> Result<usvg::Tree, RenderError> {
    usvg::Tree::from_str(svg, &usvg::Options::default())
        .map_err(|err| RenderError::InvalidSvg(Box::new(err)))
}

fn render_tree(tree: &usvg::Tree, scale: f32) -> Result<RenderedSvg, RenderError> {
    let scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or(RenderError::EmptyPixmap { width, height })?;

    resvg::render(
        tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let png = pixmap
        .encode_png()
        .map_err(|err| RenderError::EncodeFailed(Box::new(err)))?;

    Ok(RenderedSvg { png, width, height })
}

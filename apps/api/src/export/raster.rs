//! SVG rasterization — the canvas-rendering stage of the export pipeline.
//!
//! The resvg options (including the system font database, the expensive part)
//! are initialized once on first use and shared by every export afterwards.

use std::sync::OnceLock;

use resvg::tiny_skia;
use resvg::usvg;

static RASTER_OPTIONS: OnceLock<usvg::Options<'static>> = OnceLock::new();

/// One-time-initialized parse/render options. Loading system fonts takes
/// long enough that it must not happen per export.
fn options() -> &'static usvg::Options<'static> {
    RASTER_OPTIONS.get_or_init(|| {
        let mut opt = usvg::Options::default();
        opt.fontdb_mut().load_system_fonts();
        opt
    })
}

/// Ensures the rasterizer (and its font database) is initialized. Called in
/// the Preparing phase so font loading is complete before rendering starts.
pub fn ensure_initialized() {
    let _ = options();
}

/// A rasterized page as tightly packed 8-bit RGB rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub width_px: u32,
    pub height_px: u32,
    pub rgb: Vec<u8>,
}

/// Parses the rendered region. Errors here mean there is nothing to export
/// (the caller maps them to a region-not-found failure).
pub fn parse_region(svg: &str) -> Result<usvg::Tree, String> {
    if svg.trim().is_empty() {
        return Err("rendered region is empty".to_string());
    }
    usvg::Tree::from_str(svg, options()).map_err(|e| format!("rendered region is not renderable: {e}"))
}

/// Rasterizes the parsed region at the given scale factor. Higher scale means
/// a proportionally larger bitmap, more memory, and more latency.
pub fn rasterize(tree: &usvg::Tree, scale: f32) -> Result<Bitmap, String> {
    let size = tree.size();
    let width = (size.width() * scale).round() as u32;
    let height = (size.height() * scale).round() as u32;
    if width == 0 || height == 0 {
        return Err(format!("region rasterizes to a zero-size bitmap ({width}x{height})"));
    }

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| format!("failed to allocate a {width}x{height} bitmap"))?;
    resvg::render(
        tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgb.push(color.red());
        rgb.push(color.green());
        rgb.push(color.blue());
    }

    Ok(Bitmap {
        width_px: width,
        height_px: height,
        rgb,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50"><rect x="0" y="0" width="100" height="50" fill="#ff0000"/></svg>"##;

    #[test]
    fn test_parse_region_rejects_empty_input() {
        assert!(parse_region("").is_err());
        assert!(parse_region("   ").is_err());
    }

    #[test]
    fn test_parse_region_rejects_garbage() {
        assert!(parse_region("<div>not svg</div>").is_err());
    }

    #[test]
    fn test_rasterize_scales_dimensions() {
        let tree = parse_region(SQUARE_SVG).unwrap();
        let bitmap = rasterize(&tree, 2.0).unwrap();
        assert_eq!(bitmap.width_px, 200);
        assert_eq!(bitmap.height_px, 100);
        assert_eq!(bitmap.rgb.len(), 200 * 100 * 3);
    }

    #[test]
    fn test_rasterize_produces_opaque_fill_color() {
        let tree = parse_region(SQUARE_SVG).unwrap();
        let bitmap = rasterize(&tree, 1.0).unwrap();
        // first pixel of the red rect
        assert_eq!(&bitmap.rgb[0..3], &[255, 0, 0]);
    }
}

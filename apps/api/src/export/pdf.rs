//! A4 page composition — places a rasterized bitmap onto a fixed-size PDF
//! page.
//!
//! Two placement policies exist. `Fill` stretches the bitmap over the whole
//! page with zero margin, deliberately ignoring aspect ratio: the preview is
//! authored at A4 proportions, so a fill placement is distortion-free for the
//! common case and guarantees a single full-bleed page. `Margin` keeps a
//! uniform caller-chosen border.

use printpdf::{ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::export::raster::Bitmap;

pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;

pub const DEFAULT_MARGIN_MM: f64 = 10.0;

/// Resolution the embedded bitmap is declared at. Only the declared physical
/// size matters for placement math; the actual pixel density comes from the
/// rasterization scale.
const EMBED_DPI: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CompositionPolicy {
    /// Stretch to cover the entire page, zero margin (the default).
    Fill,
    /// Stretch to the page minus a uniform margin on all sides.
    Margin { margin_mm: f64 },
}

impl Default for CompositionPolicy {
    fn default() -> Self {
        CompositionPolicy::Fill
    }
}

impl CompositionPolicy {
    pub fn margin() -> Self {
        CompositionPolicy::Margin {
            margin_mm: DEFAULT_MARGIN_MM,
        }
    }
}

/// Target rectangle for the bitmap, in millimeters from the page's top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementMm {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Computes where the bitmap lands on the page. Independent of the bitmap
/// itself — both policies stretch, never letterbox.
pub fn placement(policy: CompositionPolicy) -> Result<PlacementMm, AppError> {
    match policy {
        CompositionPolicy::Fill => Ok(PlacementMm {
            x: 0.0,
            y: 0.0,
            width: A4_WIDTH_MM,
            height: A4_HEIGHT_MM,
        }),
        CompositionPolicy::Margin { margin_mm } => {
            if !margin_mm.is_finite() || margin_mm < 0.0 {
                return Err(AppError::Composition(format!(
                    "margin must be a non-negative number of millimeters, got {margin_mm}"
                )));
            }
            let width = A4_WIDTH_MM - 2.0 * margin_mm;
            let height = A4_HEIGHT_MM - 2.0 * margin_mm;
            if width <= 0.0 || height <= 0.0 {
                return Err(AppError::Composition(format!(
                    "margin of {margin_mm}mm leaves no room on a {A4_WIDTH_MM}x{A4_HEIGHT_MM}mm page"
                )));
            }
            Ok(PlacementMm {
                x: margin_mm,
                y: margin_mm,
                width,
                height,
            })
        }
    }
}

/// Composes the bitmap onto a single A4 page and returns the PDF bytes.
pub fn compose(bitmap: &Bitmap, policy: CompositionPolicy, title: &str) -> Result<Vec<u8>, AppError> {
    let rect = placement(policy)?;

    let (doc, page, layer) = PdfDocument::new(title, Mm(A4_WIDTH_MM as f32), Mm(A4_HEIGHT_MM as f32), "Page 1");
    let current_layer = doc.get_page(page).get_layer(layer);

    let image = Image::from(ImageXObject {
        width: Px(bitmap.width_px as usize),
        height: Px(bitmap.height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: bitmap.rgb.clone(),
        image_filter: None,
        clipping_bbox: None,
    });

    // Declared physical size of the bitmap at EMBED_DPI; the transform scales
    // it to the placement rect. PDF y runs bottom-up, so the top-left-based
    // rect is flipped against the page height.
    let native_width_mm = bitmap.width_px as f64 * 25.4 / EMBED_DPI;
    let native_height_mm = bitmap.height_px as f64 * 25.4 / EMBED_DPI;
    let translate_y = A4_HEIGHT_MM - rect.y - rect.height;

    image.add_to_layer(
        current_layer,
        ImageTransform {
            translate_x: Some(Mm(rect.x as f32)),
            translate_y: Some(Mm(translate_y as f32)),
            scale_x: Some((rect.width / native_width_mm) as f32),
            scale_y: Some((rect.height / native_height_mm) as f32),
            dpi: Some(EMBED_DPI as f32),
            ..Default::default()
        },
    );

    doc.save_to_bytes()
        .map_err(|e| AppError::Composition(format!("PDF serialization failed: {e}")))
}

//! Drawing export: the host's rendered image with the paper grid on top,
//! flattened and placed on a single landscape page.

use std::io::Cursor;

use log::{debug, info};
use murekkep_core::grid::{GridConfig, GridStyle};
use murekkep_core::viewport::ViewportState;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{Image, ImageTransform, Mm, PdfDocument};
use tiny_skia::Pixmap;

use crate::renderer::{RenderError, RenderResult, paint_grid};

/// A4 in landscape orientation, millimetres.
pub const A4_LANDSCAPE_MM: (f32, f32) = (297.0, 210.0);

/// Resolution the page image is declared at before scaling.
pub const EXPORT_DPI: f32 = 72.0;

const MM_PER_INCH: f32 = 25.4;

/// Where the image sits on the page, in millimetres from the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Scale an image to fill the page along its limiting axis, keep its
/// aspect ratio and center it.
pub fn fit_centered(image_width: f32, image_height: f32, page_width: f32, page_height: f32) -> PagePlacement {
    let image_ratio = image_width / image_height;
    let page_ratio = page_width / page_height;
    let (width, height) = if image_ratio > page_ratio {
        (page_width, page_width / image_ratio)
    } else {
        (page_height * image_ratio, page_height)
    };
    PagePlacement {
        x: (page_width - width) / 2.0,
        y: (page_height - height) / 2.0,
        width,
        height,
    }
}

/// Decode the host's PNG and stroke the grid over it.
///
/// Export is unscaled, so the grid starts at image pixel 0 with an
/// identity camera.
pub fn compose_grid(drawing_png: &[u8], config: &GridConfig) -> RenderResult<Pixmap> {
    let mut canvas = Pixmap::decode_png(drawing_png).map_err(|e| RenderError::Decode(e.to_string()))?;
    if config.style != GridStyle::None {
        let viewport = ViewportState::identity(canvas.width() as f64, canvas.height() as f64);
        let drawn = paint_grid(&mut canvas, &viewport, config);
        debug!("Export grid: {} lines on {}x{}", drawn, canvas.width(), canvas.height());
    }
    Ok(canvas)
}

/// Encode `pixmap` as an opaque RGB PNG, compositing over white.
pub fn flatten_to_png(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    let mut rgb = Vec::with_capacity(pixmap.width() as usize * pixmap.height() as usize * 3);
    for px in pixmap.data().chunks_exact(4) {
        // Premultiplied source over white: c + (1 - a) * 255.
        let cover = 255 - px[3];
        rgb.extend([px[0], px[1], px[2]].map(|c| c.saturating_add(cover)));
    }

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(|e| RenderError::Encode(e.to_string()))?;
        writer.write_image_data(&rgb).map_err(|e| RenderError::Encode(e.to_string()))?;
        writer.finish().map_err(|e| RenderError::Encode(e.to_string()))?;
    }
    Ok(out)
}

/// Build a one-page A4 landscape PDF holding `image_png`, fit and centered.
pub fn page_document(title: &str, image_png: &[u8], width_px: u32, height_px: u32) -> RenderResult<Vec<u8>> {
    if width_px == 0 || height_px == 0 {
        return Err(RenderError::Pdf("image has no area".to_string()));
    }
    let (page_width, page_height) = A4_LANDSCAPE_MM;
    let placement = fit_centered(width_px as f32, height_px as f32, page_width, page_height);

    let (doc, page, layer) = PdfDocument::new(title, Mm(page_width), Mm(page_height), "Drawing");
    let layer = doc.get_page(page).get_layer(layer);

    let decoder = PngDecoder::new(Cursor::new(image_png)).map_err(|e| RenderError::Pdf(e.to_string()))?;
    let image = Image::try_from(decoder).map_err(|e| RenderError::Pdf(e.to_string()))?;

    let natural_width = width_px as f32 / EXPORT_DPI * MM_PER_INCH;
    let natural_height = height_px as f32 / EXPORT_DPI * MM_PER_INCH;
    image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(placement.x)),
            translate_y: Some(Mm(placement.y)),
            scale_x: Some(placement.width / natural_width),
            scale_y: Some(placement.height / natural_height),
            dpi: Some(EXPORT_DPI),
            ..Default::default()
        },
    );

    doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
}

/// Full export pipeline: grid over drawing, flatten, paginate.
///
/// `config` is the grid snapshot taken when the export started.
pub fn export_pdf(drawing_png: &[u8], config: &GridConfig, title: &str) -> RenderResult<Vec<u8>> {
    let composed = compose_grid(drawing_png, config)?;
    let page_image = flatten_to_png(&composed)?;
    let bytes = page_document(title, &page_image, composed.width(), composed.height())?;
    info!(
        "Exported {}x{} drawing to PDF ({} bytes)",
        composed.width(),
        composed.height(),
        bytes.len()
    );
    Ok(bytes)
}

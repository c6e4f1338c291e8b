//! Grid surface shown behind the editing chrome.

use egui::{Color32, ColorImage, Context, LayerId, Pos2, Rect, TextureHandle, TextureOptions};
use log::trace;
use murekkep_render::GridRenderer;

/// Uploads the grid renderer's surface as an egui texture.
///
/// The texture is replaced only when the renderer has repainted.
#[derive(Default)]
pub struct GridOverlay {
    texture: Option<TextureHandle>,
    uploaded: Option<u64>,
}

impl GridOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the texture in line with the renderer. Returns `true` if it changed.
    pub fn sync(&mut self, ctx: &Context, renderer: &GridRenderer) -> bool {
        let revision = renderer.redraw_count();
        if self.uploaded == Some(revision) {
            return false;
        }
        self.uploaded = Some(revision);

        let (width, height) = renderer.size();
        if width == 0 || height == 0 {
            self.texture = None;
            return true;
        }

        let image = ColorImage::from_rgba_premultiplied([width as usize, height as usize], renderer.pixels());
        let options = TextureOptions::NEAREST;
        match self.texture.as_mut() {
            Some(texture) => texture.set(image, options),
            None => self.texture = Some(ctx.load_texture("murekkep_grid", image, options)),
        }
        trace!("Grid texture uploaded: {}x{}", width, height);
        true
    }

    /// Paint the texture over `rect` (logical pixels) on the background layer.
    pub fn paint(&self, ctx: &Context, rect: Rect) {
        let Some(texture) = &self.texture else {
            return;
        };
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        ctx.layer_painter(LayerId::background())
            .image(texture.id(), rect, uv, Color32::WHITE);
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }
}

//! Dijital Murekkep Render Library
//!
//! Rasterizes the paper grid behind the host canvas and composes the
//! drawing with its grid for page export.

mod export;
mod renderer;

pub use export::{
    A4_LANDSCAPE_MM, EXPORT_DPI, PagePlacement, compose_grid, export_pdf, fit_centered, flatten_to_png,
    page_document,
};
pub use renderer::{GridRenderer, RenderError, RenderResult, paint_grid};

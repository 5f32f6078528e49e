#![deny(unsafe_code)]
//! Software rasterization and file output for shapegen scenes.
//!
//! This crate sits between `shapegen-core` (which defines the `Rasterizer` and
//! `MetadataSink` seams) and the CLI. It provides the pixel canvas, the
//! built-in shape and color catalog, JSON metadata files and, behind the
//! `png` feature, PNG output.

pub mod annotations;
pub mod catalog;
pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use std::path::PathBuf;

use shapegen_core::{
    BoundingRegion, Color, ColorGenerator, ColorMode, Point, Rasterizer, SceneError, Shape, Size,
};

pub use annotations::JsonMetadataWriter;
pub use catalog::{builtin_generators, builtin_shapes};
pub use pixel::PixelCanvas;

/// A CPU rasterizer drawing into [`PixelCanvas`]es.
///
/// Finished canvases are written as `<dir>/<name>.png` when an output
/// directory is set, and kept in memory otherwise.
#[derive(Debug, Default)]
pub struct SoftwareRasterizer {
    out_dir: Option<PathBuf>,
    saved: Vec<(String, PixelCanvas)>,
}

impl SoftwareRasterizer {
    /// A rasterizer that keeps every saved canvas in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A rasterizer that writes every saved canvas as a PNG into `dir`.
    #[cfg(feature = "png")]
    pub fn to_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: Some(dir.into()),
            saved: Vec::new(),
        }
    }

    /// Canvases kept in memory, in save order.
    pub fn saved(&self) -> &[(String, PixelCanvas)] {
        &self.saved
    }

    pub fn take_saved(&mut self) -> Vec<(String, PixelCanvas)> {
        std::mem::take(&mut self.saved)
    }
}

impl Rasterizer for SoftwareRasterizer {
    type Canvas = PixelCanvas;

    fn new_canvas(
        &mut self,
        width: u32,
        height: u32,
        mode: ColorMode,
        background: Color,
    ) -> Result<PixelCanvas, SceneError> {
        PixelCanvas::new(width, height, mode, background)
    }

    fn draw_region_decoration(&mut self, canvas: &mut PixelCanvas, region: &BoundingRegion) {
        pixel::draw_region(canvas, region);
    }

    fn draw_shape(
        &mut self,
        canvas: &mut PixelCanvas,
        offset: Point,
        shape: &dyn Shape,
        colors: &mut dyn ColorGenerator,
    ) {
        let Ok(clip) = BoundingRegion::new(offset, Size::square(shape.size())) else {
            tracing::warn!(size = shape.size(), "skipping shape with empty extent");
            return;
        };
        let width = shape.line_width();
        for stroke in shape.strokes() {
            let base = colors.next_color();
            pixel::draw_stroke(canvas, &clip, &stroke, width, base, &*colors);
        }
    }

    fn save_canvas(&mut self, canvas: PixelCanvas, name: &str) -> Result<(), SceneError> {
        match &self.out_dir {
            #[cfg(feature = "png")]
            Some(dir) => {
                let path = dir.join(format!("{name}.png"));
                snapshot::write_png(&canvas, &path)?;
                tracing::debug!(path = %path.display(), "wrote image");
                Ok(())
            }
            _ => {
                self.saved.push((name.to_string(), canvas));
                Ok(())
            }
        }
    }
}

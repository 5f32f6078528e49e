//! Collaborator seams: where composed scenes leave the core.
//!
//! The composer never manipulates pixels or files. It creates, decorates,
//! draws on and saves canvases through a [`Rasterizer`], and hands finished
//! metadata to a [`MetadataSink`]. Both traits are object-safe apart from the
//! rasterizer's associated canvas type.

use crate::color::{Color, ColorMode};
use crate::error::SceneError;
use crate::generator::ColorGenerator;
use crate::geometry::{BoundingRegion, Point};
use crate::metadata::Entry;
use crate::shape::Shape;

/// Pixel-level drawing and canvas persistence.
pub trait Rasterizer {
    /// The image buffer this rasterizer draws into.
    type Canvas;

    /// Allocates a canvas filled with `background`.
    fn new_canvas(
        &mut self,
        width: u32,
        height: u32,
        mode: ColorMode,
        background: Color,
    ) -> Result<Self::Canvas, SceneError>;

    /// Draws the visible decoration (fill and/or border) of a bounding region.
    fn draw_region_decoration(&mut self, canvas: &mut Self::Canvas, region: &BoundingRegion);

    /// Draws `shape` at `offset`, asking `colors` for every stroke color.
    fn draw_shape(
        &mut self,
        canvas: &mut Self::Canvas,
        offset: Point,
        shape: &dyn Shape,
        colors: &mut dyn ColorGenerator,
    );

    /// Persists a finished canvas under `name`.
    fn save_canvas(&mut self, canvas: Self::Canvas, name: &str) -> Result<(), SceneError>;
}

/// Persistence for finished scene metadata.
pub trait MetadataSink {
    /// Stores the ordered entries of the image called `name`.
    fn save_metadata(&mut self, name: &str, entries: &[Entry]) -> Result<(), SceneError>;
}

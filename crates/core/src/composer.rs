//! The scene composer: random placement with overlap rejection.
//!
//! Composing an image runs three phases:
//!
//! - **Init**: resolve the object count, create the canvas with the
//!   background color and start empty metadata.
//! - **Placing**: repeatedly draw a size, an offset inside the margin, a shape
//!   kind and a color strategy; reject the candidate if it overlaps an
//!   accepted region (unless overlap is allowed), otherwise record and draw it.
//! - **Done**: save the canvas and the metadata under one image name.
//!
//! Rejections do not advance the placed count but do count against
//! [`SceneConfig::max_attempts`], which bounds the loop.

use crate::color::ColorMode;
use crate::config::{ResolvedColors, SceneConfig};
use crate::error::SceneError;
use crate::geometry::{BoundingRegion, Point, Size};
use crate::metadata::{Entry, SceneMetadata};
use crate::prng::RandomSource;
use crate::registry::{ColorRegistry, ShapeRegistry};
use crate::surface::{MetadataSink, Rasterizer};

/// A composed but not yet saved image.
#[derive(Debug)]
pub struct Composition<C> {
    pub canvas: C,
    pub metadata: SceneMetadata,
    /// Placement attempts made, rejected ones included.
    pub attempts: usize,
}

/// Composes scenes from the registries under one validated configuration.
pub struct Composer<'r, R> {
    config: SceneConfig,
    colors: ResolvedColors,
    shapes: &'r ShapeRegistry,
    generators: &'r mut ColorRegistry,
    rng: R,
}

/// Largest valid offset along one axis, or `CanvasTooSmall` when
/// `extent < 2 * margin + size`.
fn max_offset(axis: &'static str, extent: u32, margin: u32, size: u32) -> Result<u32, SceneError> {
    extent
        .checked_sub(margin)
        .and_then(|rest| rest.checked_sub(size))
        .filter(|&hi| hi >= margin)
        .ok_or(SceneError::CanvasTooSmall {
            axis,
            canvas: extent,
            margin,
            size,
        })
}

/// Draws an offset in `[margin, extent - margin - size]`.
fn axis_offset<R: RandomSource + ?Sized>(
    rng: &mut R,
    axis: &'static str,
    extent: u32,
    margin: u32,
    size: u32,
) -> Result<i32, SceneError> {
    let hi = max_offset(axis, extent, margin, size)?;
    let v = rng
        .pick_inclusive(margin, hi)
        .ok_or(SceneError::CanvasTooSmall {
            axis,
            canvas: extent,
            margin,
            size,
        })?;
    i32::try_from(v).map_err(|_| SceneError::InvalidDimensions)
}

impl<'r, R: RandomSource> Composer<'r, R> {
    /// Validates `config` and parses its color specs.
    ///
    /// Color-spec errors surface here, before any canvas is created.
    pub fn new(
        config: SceneConfig,
        shapes: &'r ShapeRegistry,
        generators: &'r mut ColorRegistry,
        rng: R,
    ) -> Result<Self, SceneError> {
        config.validate()?;
        let colors = config.resolve_colors()?;
        Ok(Self {
            config,
            colors,
            shapes,
            generators,
            rng,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn colors(&self) -> &ResolvedColors {
        &self.colors
    }

    fn mode(&self) -> ColorMode {
        self.config.color_mode
    }

    /// Ensures a shape of `size` fits on both axes.
    fn ensure_fits(&self, size: u32) -> Result<(), SceneError> {
        let margin = self.config.margin;
        max_offset("width", self.config.width, margin, size)?;
        max_offset("height", self.config.height, margin, size)?;
        Ok(())
    }

    fn resolve_offset(&mut self, size: u32) -> Result<Point, SceneError> {
        let margin = self.config.margin;
        let x = axis_offset(&mut self.rng, "width", self.config.width, margin, size)?;
        let y = axis_offset(&mut self.rng, "height", self.config.height, margin, size)?;
        Ok(Point::new(x, y))
    }

    /// Runs Init and Placing, returning the drawn canvas and its metadata
    /// without saving either.
    pub fn compose<Z: Rasterizer + ?Sized>(
        &mut self,
        raster: &mut Z,
    ) -> Result<Composition<Z::Canvas>, SceneError> {
        let target = self
            .config
            .object_count
            .resolve(&mut self.rng, "object count")? as usize;
        self.ensure_fits(self.config.size.max())?;

        let mode = self.mode();
        let mut canvas = raster.new_canvas(
            self.config.width,
            self.config.height,
            mode,
            self.colors.background,
        )?;
        let mut metadata = SceneMetadata::new();
        let mut attempts = 0;

        while metadata.len() < target {
            if attempts >= self.config.max_attempts {
                return Err(SceneError::PlacementExhausted {
                    placed: metadata.len(),
                    target,
                    attempts,
                });
            }
            attempts += 1;

            let size = self.config.size.resolve(&mut self.rng, "size")?;
            let offset = self.resolve_offset(size)?;
            let mut instance = self.shapes.instantiate_random(&mut self.rng, size)?;
            let generator = self
                .generators
                .prepare_random(&mut self.rng, mode, &self.colors.palette)?;

            let region = BoundingRegion::new(offset, Size::square(size))?
                .with_fill(self.colors.region_fill)
                .with_border(self.colors.region_border);

            if !self.config.allow_overlapping && metadata.is_overlapping(&region) {
                tracing::trace!(attempts, x = offset.x, y = offset.y, size, "rejected overlapping candidate");
                continue;
            }

            let index = metadata.len();
            tracing::debug!(
                index,
                kind = instance.kind(),
                colors = generator.name(),
                x = offset.x,
                y = offset.y,
                size,
                "placed shape"
            );
            metadata.add_entry(Entry {
                kind: instance.kind().to_string(),
                index,
                region: region.clone(),
            });

            if self.config.render_bounding_box {
                instance.set_render_region(true);
            }
            if instance.renders_region() {
                region.render(raster, &mut canvas);
            }
            raster.draw_shape(
                &mut canvas,
                offset,
                instance.shape(),
                generator.item_mut().as_mut(),
            );
        }

        Ok(Composition {
            canvas,
            metadata,
            attempts,
        })
    }

    /// Composes one image and saves its canvas and metadata under `name`.
    #[tracing::instrument(skip(self, raster, sink))]
    pub fn generate<Z, S>(
        &mut self,
        name: &str,
        raster: &mut Z,
        sink: &mut S,
    ) -> Result<SceneMetadata, SceneError>
    where
        Z: Rasterizer + ?Sized,
        S: MetadataSink + ?Sized,
    {
        let Composition {
            canvas,
            metadata,
            attempts,
        } = self.compose(raster)?;
        raster.save_canvas(canvas, name)?;
        metadata.save(name, sink)?;
        tracing::info!(objects = metadata.len(), attempts, "saved scene");
        Ok(metadata)
    }

    /// Generates [`SceneConfig::images`] images and returns their names.
    ///
    /// Stops at the first failing image.
    pub fn generate_run<Z, S>(&mut self, raster: &mut Z, sink: &mut S) -> Result<Vec<String>, SceneError>
    where
        Z: Rasterizer + ?Sized,
        S: MetadataSink + ?Sized,
    {
        (0..self.config.images)
            .map(|i| {
                let name = self.config.image_name(i);
                self.generate(&name, raster, sink)?;
                Ok(name)
            })
            .collect()
    }
}

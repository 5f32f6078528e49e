//! Pure-computation RGB8 canvas and the drawing primitives behind
//! [`SoftwareRasterizer`](crate::SoftwareRasterizer).
//!
//! This module is always available (no feature gate); only PNG encoding in
//! [`crate::snapshot`] needs the `image` crate.

use shapegen_core::generator::ColorGenerator;
use shapegen_core::shape::Stroke;
use shapegen_core::{BoundingRegion, Color, ColorMode, Point, SceneError};

/// A row-major RGB8 pixel buffer in a fixed color mode.
///
/// Every write is projected into the canvas mode, so a greyscale canvas only
/// ever holds grey pixels and a monochrome canvas only black and white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    mode: ColorMode,
    data: Vec<u8>,
}

impl PixelCanvas {
    /// Creates a canvas filled with `background`.
    ///
    /// Returns `SceneError::InvalidDimensions` if either side is zero or the
    /// buffer size overflows `usize`.
    pub fn new(
        width: u32,
        height: u32,
        mode: ColorMode,
        background: Color,
    ) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidDimensions);
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or(SceneError::InvalidDimensions)?;
        let bg = background.to_mode(mode);
        let data = [bg.r, bg.g, bg.b].iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            mode,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Raw RGB bytes, three per pixel.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(y).ok().filter(|&y| y < self.height)?;
        Some((y as usize * self.width as usize + x as usize) * 3)
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Color> {
        let i = self.index(x, y)?;
        Some(Color::rgb(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    /// Writes one pixel; coordinates outside the canvas are ignored.
    pub fn put(&mut self, x: i64, y: i64, color: Color) {
        if let Some(i) = self.index(x, y) {
            let c = color.to_mode(self.mode);
            self.data[i..i + 3].copy_from_slice(&[c.r, c.g, c.b]);
        }
    }

    /// Fills every pixel of `region`.
    pub fn fill_rect(&mut self, region: &BoundingRegion, color: Color) {
        for y in region.top()..region.bottom() {
            for x in region.left()..region.right() {
                self.put(x, y, color);
            }
        }
    }

    /// Draws the 1px inner outline of `region`.
    pub fn outline_rect(&mut self, region: &BoundingRegion, color: Color) {
        let (left, right) = (region.left(), region.right() - 1);
        let (top, bottom) = (region.top(), region.bottom() - 1);
        for x in left..=right {
            self.put(x, top, color);
            self.put(x, bottom, color);
        }
        for y in top..=bottom {
            self.put(left, y, color);
            self.put(right, y, color);
        }
    }

    /// Paints a `width x width` square brush centered on `(cx, cy)`, clipped
    /// to `clip`.
    fn stamp(&mut self, cx: i64, cy: i64, width: u32, clip: &BoundingRegion, color: Color) {
        let before = i64::from(width.saturating_sub(1) / 2);
        let after = i64::from(width / 2);
        for y in cy - before..=cy + after {
            for x in cx - before..=cx + after {
                if clip.contains(Point::new(x as i32, y as i32)) {
                    self.put(x, y, color);
                }
            }
        }
    }
}

/// Draws a region's decoration: its fill, then its border.
///
/// A region with neither color set gets a white border so the box stays
/// visible.
pub fn draw_region(canvas: &mut PixelCanvas, region: &BoundingRegion) {
    if let Some(fill) = region.fill() {
        canvas.fill_rect(region, fill);
    }
    let border = match (region.fill(), region.border()) {
        (_, Some(border)) => Some(border),
        (None, None) => Some(Color::WHITE),
        (Some(_), None) => None,
    };
    if let Some(border) = border {
        canvas.outline_rect(region, border);
    }
}

/// Rasterizes one stroke of a shape placed at `clip`'s offset.
///
/// Steps one pixel along the major axis, shading each step with `colors` at
/// its position `t` in [0, 1] along the stroke. The brush never paints
/// outside `clip`.
pub fn draw_stroke(
    canvas: &mut PixelCanvas,
    clip: &BoundingRegion,
    stroke: &Stroke,
    width: u32,
    base: Color,
    colors: &dyn ColorGenerator,
) {
    let origin = clip.offset();
    let (x0, y0) = (
        i64::from(origin.x) + i64::from(stroke.from.x),
        i64::from(origin.y) + i64::from(stroke.from.y),
    );
    let dx = i64::from(stroke.to.x) - i64::from(stroke.from.x);
    let dy = i64::from(stroke.to.y) - i64::from(stroke.from.y);
    let steps = dx.abs().max(dy.abs());
    for i in 0..=steps {
        let t = if steps == 0 {
            0.0
        } else {
            i as f64 / steps as f64
        };
        let x = x0 + (dx as f64 * t).round() as i64;
        let y = y0 + (dy as f64 * t).round() as i64;
        canvas.stamp(x, y, width, clip, colors.shade(base, t));
    }
}

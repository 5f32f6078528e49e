//! Axis-aligned bounding regions and the overlap test used for placement.

use serde::Serialize;

use crate::color::Color;
use crate::error::SceneError;
use crate::surface::Rasterizer;

/// An integer pixel position. Shape-local when describing strokes, canvas
/// coordinates when describing offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a region in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// A square of side `side`, saturating at `i32::MAX`.
    pub fn square(side: u32) -> Self {
        let side = i32::try_from(side).unwrap_or(i32::MAX);
        Self::new(side, side)
    }
}

/// An axis-aligned rectangle with optional decoration colors.
///
/// The rectangle covers the half-open intervals `[left, right)` and
/// `[top, bottom)`, so two regions that only share an edge or a corner do not
/// overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundingRegion {
    offset: Point,
    size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border: Option<Color>,
}

impl BoundingRegion {
    /// Creates a region without decoration colors.
    ///
    /// Returns `SceneError::InvalidGeometry` if the width or height is not
    /// strictly positive.
    pub fn new(offset: Point, size: Size) -> Result<Self, SceneError> {
        if size.width <= 0 || size.height <= 0 {
            return Err(SceneError::InvalidGeometry {
                width: i64::from(size.width),
                height: i64::from(size.height),
            });
        }
        Ok(Self {
            offset,
            size,
            fill: None,
            border: None,
        })
    }

    /// Returns the region with the given background fill.
    pub fn with_fill(mut self, fill: Option<Color>) -> Self {
        self.fill = fill;
        self
    }

    /// Returns the region with the given border color.
    pub fn with_border(mut self, border: Option<Color>) -> Self {
        self.border = border;
        self
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn border(&self) -> Option<Color> {
        self.border
    }

    pub fn left(&self) -> i64 {
        i64::from(self.offset.x)
    }

    pub fn top(&self) -> i64 {
        i64::from(self.offset.y)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.left() + i64::from(self.size.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.top() + i64::from(self.size.height)
    }

    /// Returns true if `point` lies inside the region.
    pub fn contains(&self, point: Point) -> bool {
        let (x, y) = (i64::from(point.x), i64::from(point.y));
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    /// Returns true if the interiors of `self` and `other` intersect.
    ///
    /// Both the x-intervals and the y-intervals must intersect. The test is
    /// symmetric.
    pub fn is_overlapping(&self, other: &BoundingRegion) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Draws the region's decoration onto `canvas`.
    pub fn render<Z: Rasterizer + ?Sized>(&self, raster: &mut Z, canvas: &mut Z::Canvas) {
        raster.draw_region_decoration(canvas, self);
    }
}

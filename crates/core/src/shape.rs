//! Shape kinds and the per-attempt shape instance.
//!
//! A shape is described as a set of straight [`Stroke`]s in shape-local
//! coordinates inside a `size x size` square. How strokes become pixels is the
//! rasterizer's concern.

use std::fmt;

use crate::geometry::Point;

/// A straight line between two shape-local points, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub from: Point,
    pub to: Point,
}

impl Stroke {
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

/// A drawable shape kind.
pub trait Shape: fmt::Debug {
    /// Side length of the square the shape occupies.
    fn size(&self) -> u32;

    fn set_size(&mut self, size: u32);

    /// Strokes in shape-local coordinates, each within `[0, size)`.
    fn strokes(&self) -> Vec<Stroke>;

    /// Brush width for every stroke.
    fn line_width(&self) -> u32 {
        (self.size() / 8).max(1)
    }
}

/// Builds a fresh, unsized shape of one kind.
pub type ShapeFactory = fn() -> Box<dyn Shape>;

/// Index of the last pixel along a side of length `size`.
fn far_edge(size: u32) -> i32 {
    i32::try_from(size.saturating_sub(1)).unwrap_or(i32::MAX)
}

/// An upright plus: one horizontal and one vertical bar through the center.
#[derive(Debug, Clone, Default)]
pub struct Plus {
    size: u32,
}

impl Plus {
    pub fn boxed() -> Box<dyn Shape> {
        Box::new(Self::default())
    }
}

impl Shape for Plus {
    fn size(&self) -> u32 {
        self.size
    }

    fn set_size(&mut self, size: u32) {
        self.size = size;
    }

    fn strokes(&self) -> Vec<Stroke> {
        let far = far_edge(self.size);
        let mid = far / 2;
        vec![
            Stroke::new(Point::new(0, mid), Point::new(far, mid)),
            Stroke::new(Point::new(mid, 0), Point::new(mid, far)),
        ]
    }
}

/// A diagonal cross (an "x") from corner to corner.
#[derive(Debug, Clone, Default)]
pub struct Cross {
    size: u32,
}

impl Cross {
    pub fn boxed() -> Box<dyn Shape> {
        Box::new(Self::default())
    }
}

impl Shape for Cross {
    fn size(&self) -> u32 {
        self.size
    }

    fn set_size(&mut self, size: u32) {
        self.size = size;
    }

    fn strokes(&self) -> Vec<Stroke> {
        let far = far_edge(self.size);
        vec![
            Stroke::new(Point::new(0, 0), Point::new(far, far)),
            Stroke::new(Point::new(far, 0), Point::new(0, far)),
        ]
    }
}

/// An isosceles triangle outline with its apex at the top center.
#[derive(Debug, Clone, Default)]
pub struct Triangle {
    size: u32,
}

impl Triangle {
    pub fn boxed() -> Box<dyn Shape> {
        Box::new(Self::default())
    }
}

impl Shape for Triangle {
    fn size(&self) -> u32 {
        self.size
    }

    fn set_size(&mut self, size: u32) {
        self.size = size;
    }

    fn strokes(&self) -> Vec<Stroke> {
        let far = far_edge(self.size);
        let apex = Point::new(far / 2, 0);
        let right = Point::new(far, far);
        let left = Point::new(0, far);
        vec![
            Stroke::new(apex, right),
            Stroke::new(right, left),
            Stroke::new(left, apex),
        ]
    }
}

/// One shape requested for a single placement attempt.
///
/// Carries the kind's configuration at the time it was drawn from the
/// registry; it is dropped after rendering and survives only as a metadata
/// entry.
#[derive(Debug)]
pub struct ShapeInstance {
    kind: String,
    enabled: bool,
    render_region: bool,
    shape: Box<dyn Shape>,
}

impl ShapeInstance {
    /// Wraps `shape`, sizing it to `size`.
    pub fn new(
        kind: impl Into<String>,
        mut shape: Box<dyn Shape>,
        size: u32,
        enabled: bool,
        render_region: bool,
    ) -> Self {
        shape.set_size(size);
        Self {
            kind: kind.into(),
            enabled,
            render_region,
            shape,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn size(&self) -> u32 {
        self.shape.size()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the bounding region should be drawn under the shape.
    pub fn renders_region(&self) -> bool {
        self.render_region
    }

    /// Forces region rendering on, e.g. from a global flag.
    pub fn set_render_region(&mut self, render_region: bool) {
        self.render_region = render_region;
    }

    pub fn shape(&self) -> &dyn Shape {
        self.shape.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_kinds() -> Vec<Box<dyn Shape>> {
        vec![Plus::boxed(), Cross::boxed(), Triangle::boxed()]
    }

    #[test]
    fn plus_bars_cross_at_center() {
        let mut plus = Plus::default();
        plus.set_size(21);
        assert_eq!(
            plus.strokes(),
            vec![
                Stroke::new(Point::new(0, 10), Point::new(20, 10)),
                Stroke::new(Point::new(10, 0), Point::new(10, 20)),
            ]
        );
    }

    #[test]
    fn cross_runs_corner_to_corner() {
        let mut cross = Cross::default();
        cross.set_size(10);
        let strokes = cross.strokes();
        assert_eq!(strokes[0], Stroke::new(Point::new(0, 0), Point::new(9, 9)));
        assert_eq!(strokes[1], Stroke::new(Point::new(9, 0), Point::new(0, 9)));
    }

    #[test]
    fn triangle_is_closed() {
        let mut tri = Triangle::default();
        tri.set_size(30);
        let strokes = tri.strokes();
        assert_eq!(strokes.len(), 3);
        for pair in strokes.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        assert_eq!(strokes[2].to, strokes[0].from);
    }

    #[test]
    fn strokes_stay_inside_the_square() {
        for size in [1_u32, 2, 7, 20, 64] {
            for mut shape in all_kinds() {
                shape.set_size(size);
                let limit = i32::try_from(size).unwrap();
                for s in shape.strokes() {
                    for p in [s.from, s.to] {
                        assert!(
                            (0..limit).contains(&p.x) && (0..limit).contains(&p.y),
                            "{shape:?} stroke point {p:?} outside size {size}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn line_width_scales_with_size_and_is_at_least_one() {
        let mut plus = Plus::default();
        plus.set_size(3);
        assert_eq!(plus.line_width(), 1);
        plus.set_size(64);
        assert_eq!(plus.line_width(), 8);
    }

    #[test]
    fn instance_sizes_its_shape() {
        let instance = ShapeInstance::new("Cross", Cross::boxed(), 25, true, false);
        assert_eq!(instance.kind(), "Cross");
        assert_eq!(instance.size(), 25);
        assert_eq!(instance.shape().size(), 25);
        assert!(instance.is_enabled());
        assert!(!instance.renders_region());
    }

    #[test]
    fn instance_region_flag_can_be_forced() {
        let mut instance = ShapeInstance::new("Plus", Plus::boxed(), 5, true, false);
        instance.set_render_region(true);
        assert!(instance.renders_region());
    }
}

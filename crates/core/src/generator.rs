//! Color-generation strategies.
//!
//! A [`ColorGenerator`] lives for the whole run. Each time the composer picks
//! one it is [`reset`](ColorGenerator::reset), seeded with the run's default
//! palette, and told a new shape begins with
//! [`new_form`](ColorGenerator::new_form). While the shape is drawn the
//! rasterizer asks for one color per stroke and may shade it along the stroke.

use std::fmt;

use crate::color::{Color, ColorMode};

/// A stateful source of stroke colors under a fixed color mode.
pub trait ColorGenerator: fmt::Debug {
    /// The mode this strategy produces colors for. Fixed for its lifetime.
    fn mode(&self) -> ColorMode;

    /// Clears the palette and cursor.
    fn reset(&mut self);

    /// Appends a color to the palette.
    fn add_color(&mut self, color: Color);

    /// Rewinds the cursor so the next shape starts from the first palette entry.
    fn new_form(&mut self);

    /// Color for the next stroke of the current shape.
    fn next_color(&mut self) -> Color;

    /// Color of the pixel at position `t` in [0, 1] along a stroke whose base
    /// color is `stroke_color`.
    fn shade(&self, stroke_color: Color, _t: f64) -> Color {
        stroke_color
    }
}

/// An ordered palette with a wrapping read cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteCursor {
    colors: Vec<Color>,
    cursor: usize,
}

impl PaletteCursor {
    pub fn clear(&mut self) {
        self.colors.clear();
        self.cursor = 0;
    }

    pub fn push(&mut self, color: Color) {
        self.colors.push(color);
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Returns the color under the cursor and moves to the next one, wrapping.
    pub fn advance(&mut self) -> Option<Color> {
        if self.colors.is_empty() {
            return None;
        }
        let color = self.colors[self.cursor % self.colors.len()];
        self.cursor = (self.cursor + 1) % self.colors.len();
        Some(color)
    }

    pub fn first(&self) -> Option<Color> {
        self.colors.first().copied()
    }

    pub fn last(&self) -> Option<Color> {
        self.colors.last().copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Cycles through the palette, one color per stroke.
#[derive(Debug, Clone, Default)]
pub struct Rgb {
    palette: PaletteCursor,
}

impl ColorGenerator for Rgb {
    fn mode(&self) -> ColorMode {
        ColorMode::Rgb
    }

    fn reset(&mut self) {
        self.palette.clear();
    }

    fn add_color(&mut self, color: Color) {
        self.palette.push(color);
    }

    fn new_form(&mut self) {
        self.palette.rewind();
    }

    fn next_color(&mut self) -> Color {
        self.palette.advance().unwrap_or(Color::WHITE)
    }
}

/// Paints every stroke of a shape with the first palette color.
#[derive(Debug, Clone, Default)]
pub struct Flat {
    palette: PaletteCursor,
}

impl ColorGenerator for Flat {
    fn mode(&self) -> ColorMode {
        ColorMode::Rgb
    }

    fn reset(&mut self) {
        self.palette.clear();
    }

    fn add_color(&mut self, color: Color) {
        self.palette.push(color);
    }

    fn new_form(&mut self) {
        self.palette.rewind();
    }

    fn next_color(&mut self) -> Color {
        self.palette.first().unwrap_or(Color::WHITE)
    }
}

/// Starts each stroke at the first palette color and blends towards the last.
#[derive(Debug, Clone, Default)]
pub struct LinearGradient {
    palette: PaletteCursor,
}

impl ColorGenerator for LinearGradient {
    fn mode(&self) -> ColorMode {
        ColorMode::Rgb
    }

    fn reset(&mut self) {
        self.palette.clear();
    }

    fn add_color(&mut self, color: Color) {
        self.palette.push(color);
    }

    fn new_form(&mut self) {
        self.palette.rewind();
    }

    fn next_color(&mut self) -> Color {
        self.palette.first().unwrap_or(Color::WHITE)
    }

    fn shade(&self, stroke_color: Color, t: f64) -> Color {
        match self.palette.last() {
            Some(end) => stroke_color.lerp(end, t),
            None => stroke_color,
        }
    }
}

/// Cycles through the palette reduced to grey levels.
#[derive(Debug, Clone, Default)]
pub struct Greyscale {
    palette: PaletteCursor,
}

impl ColorGenerator for Greyscale {
    fn mode(&self) -> ColorMode {
        ColorMode::Greyscale
    }

    fn reset(&mut self) {
        self.palette.clear();
    }

    fn add_color(&mut self, color: Color) {
        self.palette.push(color.to_mode(ColorMode::Greyscale));
    }

    fn new_form(&mut self) {
        self.palette.rewind();
    }

    fn next_color(&mut self) -> Color {
        self.palette.advance().unwrap_or(Color::WHITE)
    }
}

/// White ink for every non-black palette entry.
#[derive(Debug, Clone, Default)]
pub struct Monochrome {
    palette: PaletteCursor,
}

impl ColorGenerator for Monochrome {
    fn mode(&self) -> ColorMode {
        ColorMode::Monochrome
    }

    fn reset(&mut self) {
        self.palette.clear();
    }

    fn add_color(&mut self, color: Color) {
        let ink = if color == Color::BLACK {
            Color::BLACK
        } else {
            Color::WHITE
        };
        self.palette.push(ink);
    }

    fn new_form(&mut self) {
        self.palette.rewind();
    }

    fn next_color(&mut self) -> Color {
        self.palette.advance().unwrap_or(Color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const GREEN: Color = Color::rgb(0, 255, 0);

    fn seeded<G: ColorGenerator + Default>() -> G {
        let mut g = G::default();
        g.reset();
        g.add_color(RED);
        g.add_color(GREEN);
        g.new_form();
        g
    }

    #[test]
    fn cursor_wraps_around() {
        let mut p = PaletteCursor::default();
        p.push(RED);
        p.push(GREEN);
        assert_eq!(p.advance(), Some(RED));
        assert_eq!(p.advance(), Some(GREEN));
        assert_eq!(p.advance(), Some(RED));
    }

    #[test]
    fn empty_cursor_yields_nothing() {
        let mut p = PaletteCursor::default();
        assert!(p.is_empty());
        assert_eq!(p.advance(), None);
        assert_eq!(p.first(), None);
    }

    #[test]
    fn clear_drops_colors_and_cursor() {
        let mut p = PaletteCursor::default();
        p.push(RED);
        p.advance();
        p.clear();
        assert_eq!(p.len(), 0);
        p.push(GREEN);
        assert_eq!(p.advance(), Some(GREEN));
    }

    #[test]
    fn rgb_cycles_per_stroke() {
        let mut g: Rgb = seeded();
        assert_eq!(g.next_color(), RED);
        assert_eq!(g.next_color(), GREEN);
        assert_eq!(g.next_color(), RED);
    }

    #[test]
    fn new_form_restarts_palette_traversal() {
        let mut g: Rgb = seeded();
        g.next_color();
        g.new_form();
        assert_eq!(g.next_color(), RED);
    }

    #[test]
    fn reset_then_reseed_does_not_accumulate_palette() {
        let mut g: Rgb = seeded();
        g.reset();
        g.add_color(GREEN);
        g.new_form();
        assert_eq!(g.next_color(), GREEN);
        assert_eq!(g.next_color(), GREEN);
    }

    #[test]
    fn empty_palette_yields_white() {
        let mut g = Rgb::default();
        assert_eq!(g.next_color(), Color::WHITE);
        let mut f = Flat::default();
        assert_eq!(f.next_color(), Color::WHITE);
    }

    #[test]
    fn flat_keeps_first_color() {
        let mut g: Flat = seeded();
        assert_eq!(g.next_color(), RED);
        assert_eq!(g.next_color(), RED);
        assert_eq!(g.shade(RED, 0.7), RED);
    }

    #[test]
    fn gradient_shades_towards_last_color() {
        let mut g: LinearGradient = seeded();
        let base = g.next_color();
        assert_eq!(base, RED);
        assert_eq!(g.shade(base, 0.0), RED);
        assert_eq!(g.shade(base, 1.0), GREEN);
        assert_eq!(g.shade(base, 0.5), Color::rgb(128, 128, 0));
    }

    #[test]
    fn greyscale_reduces_palette_to_luma() {
        let mut g: Greyscale = seeded();
        assert_eq!(g.next_color(), Color::grey(76));
        assert_eq!(g.next_color(), Color::grey(150));
    }

    #[test]
    fn monochrome_inks_non_black_as_white() {
        let mut g: Monochrome = seeded();
        assert_eq!(g.next_color(), Color::WHITE);
        g.reset();
        g.add_color(Color::BLACK);
        assert_eq!(g.next_color(), Color::BLACK);
    }

    #[test]
    fn modes_are_fixed_per_strategy() {
        assert_eq!(Rgb::default().mode(), ColorMode::Rgb);
        assert_eq!(Flat::default().mode(), ColorMode::Rgb);
        assert_eq!(LinearGradient::default().mode(), ColorMode::Rgb);
        assert_eq!(Greyscale::default().mode(), ColorMode::Greyscale);
        assert_eq!(Monochrome::default().mode(), ColorMode::Monochrome);
    }

    #[test]
    fn generators_work_as_trait_objects() {
        let mut g: Box<dyn ColorGenerator> = Box::new(Rgb::default());
        g.add_color(GREEN);
        g.new_form();
        assert_eq!(g.next_color(), GREEN);
    }
}

//! The built-in shape kinds and color strategies.
//!
//! This is the explicit startup registration step: the host builds its
//! registries here and then applies configuration to them.

use shapegen_core::generator::{Flat, Greyscale, LinearGradient, Monochrome, Rgb};
use shapegen_core::shape::{Cross, Plus, Triangle};
use shapegen_core::{ColorRegistry, ShapeRegistry};

/// Names of the built-in shape kinds, in registration order.
pub const SHAPE_NAMES: &[&str] = &["Plus", "Cross", "Triangle"];

/// Names of the built-in color strategies, in registration order.
pub const GENERATOR_NAMES: &[&str] = &["Rgb", "Flat", "LinearGradient", "Greyscale", "Monochrome"];

/// A shape registry holding every built-in shape kind.
pub fn builtin_shapes() -> ShapeRegistry {
    let mut shapes = ShapeRegistry::shapes();
    shapes.register("Plus", Plus::boxed);
    shapes.register("Cross", Cross::boxed);
    shapes.register("Triangle", Triangle::boxed);
    shapes
}

/// A color registry holding one instance of every built-in strategy.
pub fn builtin_generators() -> ColorRegistry {
    let mut generators = ColorRegistry::generators();
    generators.register("Rgb", Box::new(Rgb::default()));
    generators.register("Flat", Box::new(Flat::default()));
    generators.register("LinearGradient", Box::new(LinearGradient::default()));
    generators.register("Greyscale", Box::new(Greyscale::default()));
    generators.register("Monochrome", Box::new(Monochrome::default()));
    generators
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapegen_core::ColorMode;

    #[test]
    fn builtin_shapes_match_names() {
        let shapes = builtin_shapes();
        assert_eq!(shapes.names().collect::<Vec<_>>(), SHAPE_NAMES);
    }

    #[test]
    fn builtin_generators_match_names() {
        let generators = builtin_generators();
        assert_eq!(generators.names().collect::<Vec<_>>(), GENERATOR_NAMES);
    }

    #[test]
    fn every_mode_has_a_generator() {
        let generators = builtin_generators();
        for mode in ColorMode::ALL {
            assert!(
                generators.kinds().iter().any(|k| k.item().mode() == mode),
                "no generator for {mode}"
            );
        }
    }

    #[test]
    fn everything_starts_enabled() {
        let shapes = builtin_shapes();
        assert!(SHAPE_NAMES.iter().all(|n| shapes.is_enabled(n)));
        let generators = builtin_generators();
        assert!(GENERATOR_NAMES.iter().all(|n| generators.is_enabled(n)));
    }
}

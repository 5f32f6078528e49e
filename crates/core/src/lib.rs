#![deny(unsafe_code)]
//! Scene composition for the shapegen synthetic-image generator.
//!
//! Provides `BoundingRegion` geometry, the `Color`/`ColorMode` model and its
//! color-spec parser, `ColorGenerator` strategies, `Shape` kinds, the
//! `ShapeRegistry`/`ColorRegistry` catalogs, `SceneConfig`, the placement
//! `Composer` and ordered `SceneMetadata`. Pixels and files are reached only
//! through the `Rasterizer` and `MetadataSink` traits.

pub mod color;
pub mod composer;
pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod metadata;
pub mod prng;
pub mod registry;
pub mod shape;
pub mod surface;

pub use color::{Color, ColorMode};
pub use composer::{Composer, Composition};
pub use config::{Amount, KindSettings, SceneConfig};
pub use error::SceneError;
pub use generator::ColorGenerator;
pub use geometry::{BoundingRegion, Point, Size};
pub use metadata::{Entry, SceneMetadata};
pub use prng::{RandomSource, Xorshift64};
pub use registry::{ColorRegistry, KindConfig, Registry, ShapeRegistry};
pub use shape::{Shape, ShapeInstance, Stroke};
pub use surface::{MetadataSink, Rasterizer};

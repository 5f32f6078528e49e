//! Error types for shapegen scene composition.

use thiserror::Error;

/// Errors produced while configuring or composing a scene.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A region was requested with a non-positive width or height.
    #[error("invalid geometry: region size {width}x{height} must be positive")]
    InvalidGeometry { width: i64, height: i64 },

    /// A color component was not an integer in [0, 255].
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A color spec had a component count other than 1 or 3.
    #[error("unsupported color spec '{spec}': {components} components (expected 1 or 3)")]
    UnsupportedColorSpec { spec: String, components: usize },

    /// A color mode name was not one of the canonical names.
    #[error("unknown color mode: {0}")]
    UnknownColorMode(String),

    /// The canvas cannot hold a shape of the given size inside its margin.
    #[error(
        "canvas too small: {axis} extent {canvas} cannot fit size {size} with margin {margin}"
    )]
    CanvasTooSmall {
        axis: &'static str,
        canvas: u32,
        margin: u32,
        size: u32,
    },

    /// No registered kind is both enabled and eligible.
    #[error("no eligible kind: {0}")]
    NoEligibleKind(String),

    /// The placement loop hit its attempt cap before reaching the target count.
    #[error("placement exhausted: placed {placed} of {target} objects after {attempts} attempts")]
    PlacementExhausted {
        placed: usize,
        target: usize,
        attempts: usize,
    },

    /// Canvas width or height was zero.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A configured `{min, max}` range was inverted.
    #[error("invalid {what} range: min {min} > max {max}")]
    InvalidRange {
        what: &'static str,
        min: u32,
        max: u32,
    },

    /// A kind name was not found in a registry.
    #[error("unknown kind: {0}")]
    UnknownKind(String),

    /// A collaborator failed to write a canvas or metadata.
    #[error("i/o error: {0}")]
    Io(String),
}

//! PNG encoding of a [`PixelCanvas`].
//!
//! This module is feature-gated behind `png` (default on) so that the drawing
//! code can be used without pulling in the `image` crate. The pixel buffer
//! itself lives in [`crate::pixel`] (always available).

use shapegen_core::SceneError;
use std::path::Path;

use crate::pixel::PixelCanvas;

/// Writes a canvas as an 8-bit RGB PNG.
///
/// Returns `SceneError::Io` on encoding or write failure.
pub fn write_png(canvas: &PixelCanvas, path: &Path) -> Result<(), SceneError> {
    let img = image::RgbImage::from_raw(canvas.width(), canvas.height(), canvas.data().to_vec())
        .ok_or_else(|| SceneError::Io("RGB buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| SceneError::Io(format!("{}: {e}", path.display())))
}

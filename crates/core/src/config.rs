//! Run configuration for scene generation.
//!
//! [`SceneConfig`] is plain serde data with a default for every field, so a
//! JSON config file only needs the keys it changes. Color specs stay strings
//! until [`SceneConfig::resolve_colors`] parses them, which the composer does
//! before any canvas work.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorMode};
use crate::error::SceneError;
use crate::prng::RandomSource;
use crate::registry::{ColorRegistry, ShapeRegistry};

/// A fixed number or an inclusive `{min, max}` range sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Fixed(u32),
    Range { min: u32, max: u32 },
}

impl Amount {
    pub fn min(&self) -> u32 {
        match *self {
            Amount::Fixed(n) => n,
            Amount::Range { min, .. } => min,
        }
    }

    pub fn max(&self) -> u32 {
        match *self {
            Amount::Fixed(n) => n,
            Amount::Range { max, .. } => max,
        }
    }

    /// Returns `SceneError::InvalidRange` if `min > max`.
    pub fn validate(&self, what: &'static str) -> Result<(), SceneError> {
        if self.min() > self.max() {
            return Err(SceneError::InvalidRange {
                what,
                min: self.min(),
                max: self.max(),
            });
        }
        Ok(())
    }

    /// Resolves to a concrete value, drawing from `rng` only for ranges.
    pub fn resolve<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        what: &'static str,
    ) -> Result<u32, SceneError> {
        match *self {
            Amount::Fixed(n) => Ok(n),
            Amount::Range { min, max } => rng
                .pick_inclusive(min, max)
                .ok_or(SceneError::InvalidRange { what, min, max }),
        }
    }
}

/// Per-kind toggles, keyed by kind name in [`SceneConfig::kinds`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KindSettings {
    /// Excludes the kind from random selection.
    pub disable: bool,
    /// Draws the bounding region under shapes of this kind.
    pub bounding_box: bool,
}

/// Everything needed to reproduce a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub size: Amount,
    pub object_count: Amount,
    pub allow_overlapping: bool,
    pub color_mode: ColorMode,
    pub background_color: Option<String>,
    pub bounding_box_fill: Option<String>,
    pub bounding_box_border: Option<String>,
    pub palette: Vec<String>,
    pub render_bounding_box: bool,
    pub kinds: BTreeMap<String, KindSettings>,
    /// Placement attempts allowed per image, rejected ones included.
    pub max_attempts: usize,
    pub images: usize,
    pub seed: u64,
    pub prefix: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            margin: 10,
            size: Amount::Range { min: 20, max: 60 },
            object_count: Amount::Range { min: 1, max: 5 },
            allow_overlapping: false,
            color_mode: ColorMode::Rgb,
            background_color: None,
            bounding_box_fill: None,
            bounding_box_border: None,
            palette: vec!["255,0,0".to_string(), "0,255,0".to_string()],
            render_bounding_box: false,
            kinds: BTreeMap::new(),
            max_attempts: 10_000,
            images: 1,
            seed: 42,
            prefix: "scene".to_string(),
        }
    }
}

/// Parsed color settings of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColors {
    pub background: Color,
    pub region_fill: Option<Color>,
    pub region_border: Option<Color>,
    pub palette: Vec<Color>,
}

impl SceneConfig {
    /// Parses a JSON config; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Checks dimensions and ranges.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::InvalidDimensions);
        }
        self.size.validate("size")?;
        if self.size.min() == 0 {
            return Err(SceneError::InvalidGeometry {
                width: 0,
                height: 0,
            });
        }
        self.object_count.validate("object count")?;
        Ok(())
    }

    /// Parses every color spec under the configured mode. The background
    /// defaults to black.
    pub fn resolve_colors(&self) -> Result<ResolvedColors, SceneError> {
        let mode = self.color_mode;
        let background =
            Color::from_optional_spec(self.background_color.as_deref(), mode)?.unwrap_or(Color::BLACK);
        let palette = self
            .palette
            .iter()
            .map(|spec| Color::from_spec(spec, mode))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ResolvedColors {
            background,
            region_fill: Color::from_optional_spec(self.bounding_box_fill.as_deref(), mode)?,
            region_border: Color::from_optional_spec(self.bounding_box_border.as_deref(), mode)?,
            palette,
        })
    }

    /// Applies [`SceneConfig::kinds`] to the registries.
    ///
    /// Each name is looked up among shapes first, then color generators.
    /// Returns `SceneError::UnknownKind` for a name found in neither.
    pub fn apply_kind_settings(
        &self,
        shapes: &mut ShapeRegistry,
        generators: &mut ColorRegistry,
    ) -> Result<(), SceneError> {
        for (name, settings) in &self.kinds {
            if shapes.get(name).is_some() {
                shapes.set_enabled(name, !settings.disable)?;
                shapes.set_render_region(name, settings.bounding_box)?;
            } else if generators.get(name).is_some() {
                generators.set_enabled(name, !settings.disable)?;
            } else {
                return Err(SceneError::UnknownKind(name.clone()));
            }
        }
        Ok(())
    }

    /// Name of the `index`-th image of the run, shared by the canvas and its
    /// metadata.
    pub fn image_name(&self, index: usize) -> String {
        format!("{}_{index:04}", self.prefix)
    }
}

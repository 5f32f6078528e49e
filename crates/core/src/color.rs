//! 8-bit colors, color modes and the `"r,g,b"` / `"v"` color-spec format.
//!
//! Color specs come from configuration. A spec with one component is a grey
//! level (`"128"` is `(128, 128, 128)`); under [`ColorMode::Monochrome`] the
//! single value `1` means white. A spec with three components is `(r, g, b)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SceneError;

/// An RGB color with 8-bit channels.
///
/// Serializes as the `"r,g,b"` spec string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The pixel format a scene is rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColorMode {
    Monochrome,
    Greyscale,
    #[default]
    Rgb,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A neutral grey with all three channels set to `v`.
    pub const fn grey(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Builds a color from wide integer components.
    ///
    /// Returns `SceneError::InvalidColor` if any component is outside [0, 255].
    pub fn from_components(r: i64, g: i64, b: i64) -> Result<Self, SceneError> {
        let channel = |name: &str, v: i64| {
            u8::try_from(v).map_err(|_| {
                SceneError::InvalidColor(format!("{name} component {v} is outside [0, 255]"))
            })
        };
        Ok(Self::rgb(
            channel("red", r)?,
            channel("green", g)?,
            channel("blue", b)?,
        ))
    }

    /// Parses a comma-separated color spec of 1 or 3 integer components.
    ///
    /// Returns `SceneError::UnsupportedColorSpec` for any other component
    /// count and `SceneError::InvalidColor` for a component that is not an
    /// integer in [0, 255].
    pub fn from_spec(spec: &str, mode: ColorMode) -> Result<Self, SceneError> {
        let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
        let parse = |part: &str| {
            part.parse::<i64>().map_err(|e| {
                SceneError::InvalidColor(format!("'{part}' in spec '{spec}' is not an integer: {e}"))
            })
        };
        match *parts.as_slice() {
            ["1"] if mode == ColorMode::Monochrome => Ok(Color::WHITE),
            [v] => {
                let v = parse(v)?;
                Self::from_components(v, v, v)
            }
            [r, g, b] => Self::from_components(parse(r)?, parse(g)?, parse(b)?),
            _ => Err(SceneError::UnsupportedColorSpec {
                spec: spec.to_string(),
                components: parts.len(),
            }),
        }
    }

    /// Parses an optional spec, passing `None` through.
    pub fn from_optional_spec(
        spec: Option<&str>,
        mode: ColorMode,
    ) -> Result<Option<Self>, SceneError> {
        spec.map(|s| Self::from_spec(s, mode)).transpose()
    }

    /// Integer Rec. 601 luma in [0, 255].
    pub fn luma(self) -> u8 {
        let y = 299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b);
        ((y + 500) / 1000) as u8
    }

    /// Projects the color into `mode`'s gamut.
    ///
    /// Greyscale keeps the luma; monochrome thresholds the luma at 128.
    pub fn to_mode(self, mode: ColorMode) -> Self {
        match mode {
            ColorMode::Rgb => self,
            ColorMode::Greyscale => Self::grey(self.luma()),
            ColorMode::Monochrome if self.luma() >= 128 => Self::WHITE,
            ColorMode::Monochrome => Self::BLACK,
        }
    }

    /// Linear interpolation towards `other`, `t` clamped to [0, 1].
    pub fn lerp(self, other: Color, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self::rgb(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_spec(&s, ColorMode::Rgb).map_err(serde::de::Error::custom)
    }
}

impl ColorMode {
    pub const ALL: [ColorMode; 3] = [ColorMode::Monochrome, ColorMode::Greyscale, ColorMode::Rgb];

    /// Canonical configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Monochrome => "monochrome",
            ColorMode::Greyscale => "greyscale",
            ColorMode::Rgb => "rgb",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monochrome" => Ok(ColorMode::Monochrome),
            "greyscale" | "grayscale" => Ok(ColorMode::Greyscale),
            "rgb" => Ok(ColorMode::Rgb),
            _ => Err(SceneError::UnknownColorMode(s.to_string())),
        }
    }
}

impl Serialize for ColorMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ColorMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

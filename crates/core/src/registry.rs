//! Catalogs of shape kinds and color-generation strategies.
//!
//! Registries are populated once at startup by explicit `register` calls and
//! configured (enable/disable, region rendering) before composition starts.
//! During composition they are only sampled. Random selection filters the
//! eligible subset first, so an empty or fully disabled registry yields
//! `SceneError::NoEligibleKind` rather than an endless redraw.

use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorMode};
use crate::error::SceneError;
use crate::generator::ColorGenerator;
use crate::prng::RandomSource;
use crate::shape::{ShapeFactory, ShapeInstance};

/// Names of abstract shape kinds that must never be registered.
pub const SHAPE_BLACKLIST: &[&str] = &["Form", "PolygonForm"];

/// Names of abstract color strategies that must never be registered.
pub const COLOR_BLACKLIST: &[&str] = &["ColorGenerator", "Gradient"];

/// Per-kind configuration owned by the registry entry.
///
/// `render_region` is only consulted for shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindConfig {
    pub enabled: bool,
    pub render_region: bool,
}

impl Default for KindConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            render_region: false,
        }
    }
}

/// A named registry entry.
#[derive(Debug)]
pub struct Kind<T> {
    name: String,
    item: T,
    config: KindConfig,
}

impl<T> Kind<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }

    pub fn config(&self) -> KindConfig {
        self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}

/// An ordered, name-keyed catalog with a blacklist of unregistrable names.
///
/// Names compare ASCII case-insensitively. Registration order is preserved
/// so seeded selection is reproducible.
#[derive(Debug)]
pub struct Registry<T> {
    label: &'static str,
    kinds: Vec<Kind<T>>,
    blacklist: Vec<String>,
}

/// Shape kinds, each built fresh per placement attempt.
pub type ShapeRegistry = Registry<ShapeFactory>;

/// Color strategies, each a single instance reused for the whole run.
pub type ColorRegistry = Registry<Box<dyn ColorGenerator>>;

impl<T> Registry<T> {
    /// Creates an empty registry. `label` names the kind of entry in errors.
    pub fn new(label: &'static str, blacklist: &[&str]) -> Self {
        Self {
            label,
            kinds: Vec::new(),
            blacklist: blacklist.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Adds a kind, replacing any kind with the same name.
    ///
    /// Blacklisted names are silently ignored. Returns whether the kind was
    /// added.
    pub fn register(&mut self, name: impl Into<String>, item: T) -> bool {
        let name = name.into();
        if self.is_blacklisted(&name) {
            tracing::debug!(registry = self.label, %name, "ignoring blacklisted kind");
            return false;
        }
        let kind = Kind {
            name,
            item,
            config: KindConfig::default(),
        };
        match self.position(&kind.name) {
            Some(i) => self.kinds[i] = kind,
            None => {
                tracing::debug!(registry = self.label, name = %kind.name, "registered kind");
                self.kinds.push(kind);
            }
        }
        true
    }

    /// Adds `name` to the blacklist. Idempotent.
    pub fn blacklist(&mut self, name: &str) {
        if !self.is_blacklisted(name) {
            self.blacklist.push(name.to_string());
        }
    }

    pub fn is_blacklisted(&self, name: &str) -> bool {
        self.blacklist.iter().any(|b| b.eq_ignore_ascii_case(name))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.kinds
            .iter()
            .position(|k| k.name.eq_ignore_ascii_case(name))
    }

    pub fn get(&self, name: &str) -> Option<&Kind<T>> {
        self.position(name).map(|i| &self.kinds[i])
    }

    fn config_mut(&mut self, name: &str) -> Result<&mut KindConfig, SceneError> {
        let i = self
            .position(name)
            .ok_or_else(|| SceneError::UnknownKind(format!("{} '{name}'", self.label)))?;
        Ok(&mut self.kinds[i].config)
    }

    pub fn enable(&mut self, name: &str) -> Result<(), SceneError> {
        self.set_enabled(name, true)
    }

    pub fn disable(&mut self, name: &str) -> Result<(), SceneError> {
        self.set_enabled(name, false)
    }

    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), SceneError> {
        self.config_mut(name)?.enabled = enabled;
        Ok(())
    }

    pub fn set_render_region(&mut self, name: &str, render_region: bool) -> Result<(), SceneError> {
        self.config_mut(name)?.render_region = render_region;
        Ok(())
    }

    /// Returns false for unknown names.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.get(name).is_some_and(Kind::is_enabled)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(Kind::name)
    }

    pub fn kinds(&self) -> &[Kind<T>] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    fn eligible_index<R, P>(&self, rng: &mut R, predicate: P) -> Result<usize, SceneError>
    where
        R: RandomSource + ?Sized,
        P: Fn(&T) -> bool,
    {
        let eligible: Vec<usize> = self
            .kinds
            .iter()
            .enumerate()
            .filter(|(_, k)| k.config.enabled && predicate(&k.item))
            .map(|(i, _)| i)
            .collect();
        let pick = rng.pick_index(eligible.len()).ok_or_else(|| {
            SceneError::NoEligibleKind(format!(
                "no enabled {} is eligible ({} registered)",
                self.label,
                self.kinds.len()
            ))
        })?;
        Ok(eligible[pick])
    }

    /// Uniformly samples an enabled kind whose item satisfies `predicate`.
    pub fn select_random_enabled<R, P>(&self, rng: &mut R, predicate: P) -> Result<&Kind<T>, SceneError>
    where
        R: RandomSource + ?Sized,
        P: Fn(&T) -> bool,
    {
        let i = self.eligible_index(rng, predicate)?;
        Ok(&self.kinds[i])
    }

    /// Mutable form of [`Registry::select_random_enabled`].
    pub fn select_random_enabled_mut<R, P>(
        &mut self,
        rng: &mut R,
        predicate: P,
    ) -> Result<&mut Kind<T>, SceneError>
    where
        R: RandomSource + ?Sized,
        P: Fn(&T) -> bool,
    {
        let i = self.eligible_index(rng, predicate)?;
        Ok(&mut self.kinds[i])
    }
}

impl Registry<ShapeFactory> {
    /// An empty shape registry with the abstract shape names blacklisted.
    pub fn shapes() -> Self {
        Self::new("shape", SHAPE_BLACKLIST)
    }

    /// Draws a random enabled kind and builds a fresh instance of `size`.
    pub fn instantiate_random<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        size: u32,
    ) -> Result<ShapeInstance, SceneError> {
        let kind = self.select_random_enabled(rng, |_| true)?;
        let factory = kind.item;
        Ok(ShapeInstance::new(
            kind.name.clone(),
            factory(),
            size,
            kind.config.enabled,
            kind.config.render_region,
        ))
    }
}

impl Registry<Box<dyn ColorGenerator>> {
    /// An empty color registry with the abstract strategy names blacklisted.
    pub fn generators() -> Self {
        Self::new("color generator", COLOR_BLACKLIST)
    }

    /// Picks an enabled strategy for `mode`, resets it, seeds it with
    /// `palette` and signals the start of a new shape.
    pub fn prepare_random<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        mode: ColorMode,
        palette: &[Color],
    ) -> Result<&mut Kind<Box<dyn ColorGenerator>>, SceneError> {
        let registered = self.len();
        let kind = self
            .select_random_enabled_mut(rng, |g| g.mode() == mode)
            .map_err(|_| {
                SceneError::NoEligibleKind(format!(
                    "no enabled color generator for mode {mode} ({registered} registered)"
                ))
            })?;
        let generator = kind.item_mut();
        generator.reset();
        for &color in palette {
            generator.add_color(color);
        }
        generator.new_form();
        Ok(kind)
    }
}

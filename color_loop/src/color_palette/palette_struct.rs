// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`ColorPalette`] is an immutable closed loop of colors plus its rendered scale.
//!
//! Every "mutating" operation returns a palette. When the operation changes nothing
//! visible (same colors, same mode, same number of steps) the very same handle is
//! returned, which callers can detect with [`ColorPalette::ptr_eq`]. A theme relies on
//! this to avoid starting a transition that would go nowhere.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use rand::Rng;

use super::{PaletteColors, PaletteConfig, RandomColorConfig, RandomColorGenerator,
            RandomPaletteConfig, palette_defaults::fallback_color};
use crate::{Color, ColorInput, DEBUG_COLOR_LOOP, InterpolationMode, PaletteResult,
            parse_color_inputs, sample_loop};

/// Cheap to clone. Clones share the same colors and scale.
#[derive(Clone)]
pub struct ColorPalette {
    inner: Arc<PaletteData>,
}

struct PaletteData {
    colors: Vec<Color>,
    hexes: Vec<String>,
    key: String,
    mode: InterpolationMode,
    n_steps: usize,
    scale: Arc<[Color]>,
    delta_e_threshold: f32,
    max_number_of_colors: usize,
}

/// Palettes are equal when they render the same scale.
impl PartialEq for ColorPalette {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.key() == other.key()
                && self.mode() == other.mode()
                && self.n_steps() == other.n_steps())
    }
}

impl Debug for ColorPalette {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorPalette")
            .field("key", &self.key())
            .field("mode", &self.mode())
            .field("n_steps", &self.n_steps())
            .field("max_number_of_colors", &self.max_number_of_colors())
            .finish()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::from_colors(
            vec![fallback_color()],
            Settings::from(&PaletteConfig::default()),
        )
    }
}

/// Everything except the colors, with the clamps applied.
#[derive(Debug, Clone, Copy)]
struct Settings {
    mode: InterpolationMode,
    n_steps: usize,
    delta_e_threshold: f32,
    max_number_of_colors: usize,
}

impl From<&PaletteConfig> for Settings {
    fn from(config: &PaletteConfig) -> Self {
        Self {
            mode: config.mode,
            n_steps: config.n_steps.max(1),
            delta_e_threshold: config.delta_e_threshold.max(0.0),
            max_number_of_colors: config.max_number_of_colors.max(1),
        }
    }
}

/// Construction.
impl ColorPalette {
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidColor`] if any of the input colors can't be
    /// parsed.
    pub fn try_new(config: PaletteConfig) -> PaletteResult<Self> {
        let settings = Settings::from(&config);
        let colors = match config.colors {
            PaletteColors::Inputs(inputs) => parse_color_inputs(&inputs)?,
            PaletteColors::Normalized(colors) => colors,
            PaletteColors::Random { n_colors } => {
                random_colors(n_colors, settings.delta_e_threshold, &mut rand::rng())
            }
        };
        Ok(Self::from_colors(colors, settings))
    }

    /// A palette of `n_colors` independent random colors (at least one). The `colors`
    /// field of `config` is ignored.
    #[must_use]
    pub fn random(n_colors: usize, config: &PaletteConfig) -> Self {
        let settings = Settings::from(config);
        let colors = random_colors(n_colors, settings.delta_e_threshold, &mut rand::rng());
        Self::from_colors(colors, settings)
    }

    /// Parses `inputs` and closes them into a loop (see [`close_loop`]).
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidColor`] for the first unparsable input.
    pub fn normalize_colors(inputs: &[ColorInput]) -> PaletteResult<Vec<Color>> {
        Ok(close_loop(parse_color_inputs(inputs)?))
    }

    /// The first `max` entries of `colors`.
    #[must_use]
    pub fn clamp_colors<T: Clone>(colors: &[T], max: usize) -> Vec<T> {
        colors.iter().take(max).cloned().collect()
    }

    fn from_colors(colors: Vec<Color>, settings: Settings) -> Self {
        let colors = crop_loop(close_loop(colors), settings.max_number_of_colors);
        let hexes: Vec<String> = colors.iter().map(Color::hex).collect();
        let key = hexes.join(":");
        let scale: Arc<[Color]> = sample_loop(&colors, settings.n_steps, settings.mode).into();

        DEBUG_COLOR_LOOP.then(|| {
            // % is Display, ? is Debug.
            tracing::trace!(
                message = "🎨 New palette",
                key = %key,
                mode = %settings.mode,
                n_steps = %settings.n_steps,
            );
        });

        Self {
            inner: Arc::new(PaletteData {
                colors,
                hexes,
                key,
                mode: settings.mode,
                n_steps: settings.n_steps,
                scale,
                delta_e_threshold: settings.delta_e_threshold,
                max_number_of_colors: settings.max_number_of_colors,
            }),
        }
    }

    fn settings(&self) -> Settings {
        Settings {
            mode: self.mode(),
            n_steps: self.n_steps(),
            delta_e_threshold: self.delta_e_threshold(),
            max_number_of_colors: self.max_number_of_colors(),
        }
    }
}

/// Accessors.
impl ColorPalette {
    /// The closed loop: the last entry repeats the first.
    #[must_use]
    pub fn colors(&self) -> &[Color] { &self.inner.colors }

    /// Lowercase `#rrggbb` strings for [`Self::colors`].
    #[must_use]
    pub fn hexes(&self) -> &[String] { &self.inner.hexes }

    /// [`Self::hexes`] joined with `:`. Identifies the color content of the palette.
    #[must_use]
    pub fn key(&self) -> &str { &self.inner.key }

    /// Number of real colors, ie: excluding the closing duplicate. Always at least `1`.
    #[must_use]
    pub fn n_colors(&self) -> usize { self.inner.colors.len() - 1 }

    #[must_use]
    pub fn mode(&self) -> InterpolationMode { self.inner.mode }

    #[must_use]
    pub fn n_steps(&self) -> usize { self.inner.n_steps }

    /// The rendered scale, exactly [`Self::n_steps`] colors long.
    #[must_use]
    pub fn scale(&self) -> &[Color] { &self.inner.scale }

    /// Shared handle to [`Self::scale`].
    #[must_use]
    pub fn scale_arc(&self) -> Arc<[Color]> { Arc::clone(&self.inner.scale) }

    #[must_use]
    pub fn delta_e_threshold(&self) -> f32 { self.inner.delta_e_threshold }

    #[must_use]
    pub fn max_number_of_colors(&self) -> usize { self.inner.max_number_of_colors }

    /// `true` if both handles point at the same palette instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.inner, &other.inner) }

    /// The real colors, without the closing duplicate.
    fn real_colors(&self) -> &[Color] { &self.inner.colors[..self.n_colors()] }
}

/// Derivation. Each of these returns `self.clone()` when nothing would change.
impl ColorPalette {
    /// Applies new colors, mode, number of steps, and optionally a new capacity in one
    /// go.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidColor`] if any color can't be parsed.
    pub fn new_config(
        &self,
        colors: &[ColorInput],
        n_steps: usize,
        mode: InterpolationMode,
        max_number_of_colors: Option<usize>,
    ) -> PaletteResult<Self> {
        let settings = Settings {
            mode,
            n_steps: n_steps.max(1),
            max_number_of_colors: max_number_of_colors
                .map_or(self.max_number_of_colors(), |max| max.max(1)),
            ..self.settings()
        };

        let parsed = parse_color_inputs(colors)?;
        let closed = crop_loop(close_loop(parsed.clone()), settings.max_number_of_colors);
        let same_colors = loop_key(&closed) == self.key();

        match (same_colors, settings.n_steps == self.n_steps(), mode == self.mode()) {
            (true, true, true) => Ok(self.clone()),
            (true, true, false) => Ok(self.new_mode(mode)),
            _ => Ok(Self::from_colors(parsed, settings)),
        }
    }

    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidColor`] if any color can't be parsed.
    pub fn new_colors(&self, colors: &[ColorInput]) -> PaletteResult<Self> {
        Ok(self.with_colors(parse_color_inputs(colors)?))
    }

    #[must_use]
    pub fn new_mode(&self, mode: InterpolationMode) -> Self {
        if mode == self.mode() {
            return self.clone();
        }
        Self::from_colors(self.inner.colors.clone(), Settings {
            mode,
            ..self.settings()
        })
    }

    /// Switches to [`InterpolationMode::next`].
    #[must_use]
    pub fn rotate_mode(&self) -> Self { self.new_mode(self.mode().next()) }

    /// Replaces the colors with `seed` followed by random colors. Each random color is
    /// at least [`Self::delta_e_threshold`] away from the one before it, and the last one
    /// is also kept away from `seed` so the loop closes on a visible step.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidColor`] if `seed` can't be parsed.
    pub fn randomize_from(
        &self,
        seed: impl Into<ColorInput>,
        config: RandomPaletteConfig,
    ) -> PaletteResult<Self> {
        let seed = seed.into().to_color()?;
        Ok(self.randomize_from_with_rng(seed, config, &mut rand::rng()))
    }

    /// Like [`Self::randomize_from`], with a random seed that honors the brightness floor.
    #[must_use]
    pub fn randomize(&self, config: RandomPaletteConfig) -> Self {
        self.randomize_with_rng(config, &mut rand::rng())
    }

    /// Appends `color` as the newest color. No-op when the palette is full.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidColor`] if `color` can't be parsed.
    pub fn push(&self, color: impl Into<ColorInput>) -> PaletteResult<Self> {
        if self.is_full() {
            return Ok(self.clone());
        }
        let color = color.into().to_color()?;
        Ok(self.pushed(color))
    }

    /// Appends a random color, distinct from its neighbors in the loop. No-op when the
    /// palette is full.
    #[must_use]
    pub fn push_random(&self, config: RandomColorConfig) -> Self {
        self.push_random_with_rng(config, &mut rand::rng())
    }

    /// Drops the oldest (first) color. No-op when only one color is left.
    #[must_use]
    pub fn pop_oldest(&self) -> Self {
        if self.n_colors() < 2 {
            return self.clone();
        }
        self.with_colors(self.real_colors()[1..].to_vec())
    }

    /// Drops the oldest color and appends `color`, keeping the number of colors.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidColor`] if `color` can't be parsed.
    pub fn rotate_on(&self, color: impl Into<ColorInput>) -> PaletteResult<Self> {
        let color = color.into().to_color()?;
        Ok(self.rotated_on(color))
    }

    /// [`Self::rotate_on`] with a random color, distinct from its neighbors in the loop.
    #[must_use]
    pub fn rotate_random_on(&self, config: RandomColorConfig) -> Self {
        self.rotate_random_on_with_rng(config, &mut rand::rng())
    }
}

/// Variants of the random operations that take the random number generator as an
/// argument, so that results can be reproduced with a seeded generator.
impl ColorPalette {
    #[must_use]
    pub fn randomize_from_with_rng(
        &self,
        seed: Color,
        config: RandomPaletteConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let n_colors = config
            .n_colors
            .unwrap_or(self.n_colors())
            .clamp(1, self.max_number_of_colors());
        let generator = self.generator(config.min_brightness);

        let mut colors = Vec::with_capacity(n_colors + 1);
        colors.push(seed);
        while colors.len() < n_colors {
            let previous = colors[colors.len() - 1];
            let references = if colors.len() + 1 == n_colors {
                vec![previous, seed]
            } else {
                vec![previous]
            };
            colors.push(generator.generate_distinct_from(&references, rng));
        }
        self.with_colors(colors)
    }

    #[must_use]
    pub fn randomize_with_rng(&self, config: RandomPaletteConfig, rng: &mut impl Rng) -> Self {
        let seed = self.generator(config.min_brightness).generate(rng);
        self.randomize_from_with_rng(seed, config, rng)
    }

    #[must_use]
    pub fn push_random_with_rng(&self, config: RandomColorConfig, rng: &mut impl Rng) -> Self {
        if self.is_full() {
            return self.clone();
        }
        let real = self.real_colors();
        let references = [real[real.len() - 1], real[0]];
        let color = self
            .generator(config.min_brightness)
            .generate_distinct_from(&references, rng);
        self.pushed(color)
    }

    #[must_use]
    pub fn rotate_random_on_with_rng(
        &self,
        config: RandomColorConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let real = self.real_colors();
        let newest = real[real.len() - 1];
        let next_oldest = real.get(1).copied().unwrap_or(newest);
        let color = self
            .generator(config.min_brightness)
            .generate_distinct_from(&[newest, next_oldest], rng);
        self.rotated_on(color)
    }
}

impl ColorPalette {
    fn is_full(&self) -> bool { self.n_colors() >= self.max_number_of_colors() }

    fn generator(&self, min_brightness: f32) -> RandomColorGenerator {
        RandomColorGenerator::new(self.delta_e_threshold(), min_brightness)
    }

    fn pushed(&self, color: Color) -> Self {
        let mut colors = self.real_colors().to_vec();
        colors.push(color);
        self.with_colors(colors)
    }

    fn rotated_on(&self, color: Color) -> Self {
        let mut colors = self.real_colors()[1..].to_vec();
        colors.push(color);
        self.with_colors(colors)
    }

    /// Same settings, new colors. Returns `self.clone()` if the colors end up the same.
    fn with_colors(&self, colors: Vec<Color>) -> Self {
        let closed = crop_loop(close_loop(colors), self.max_number_of_colors());
        if loop_key(&closed) == self.key() {
            return self.clone();
        }
        Self::from_colors(closed, self.settings())
    }
}

/// Makes sure the last color repeats the first. A trailing color that already matches the
/// first one (by hex) is replaced rather than duplicated. An empty list becomes a loop of
/// the fallback color.
#[must_use]
pub fn close_loop(mut colors: Vec<Color>) -> Vec<Color> {
    let Some(first) = colors.first().copied() else {
        let fallback = fallback_color();
        return vec![fallback, fallback];
    };
    if colors.len() > 1
        && colors
            .last()
            .is_some_and(|last| last.hex() == first.hex())
    {
        colors.pop();
    }
    colors.push(first);
    colors
}

/// Keeps at most `max` real colors of a closed loop, and re-closes it.
fn crop_loop(mut colors: Vec<Color>, max: usize) -> Vec<Color> {
    if colors.len() > max + 1 {
        colors.truncate(max);
        colors.push(colors[0]);
    }
    colors
}

fn loop_key(colors: &[Color]) -> String {
    colors.iter().map(Color::hex).collect::<Vec<_>>().join(":")
}

fn random_colors(n_colors: usize, delta_e_threshold: f32, rng: &mut impl Rng) -> Vec<Color> {
    let generator = RandomColorGenerator::new(delta_e_threshold, 0.0);
    (0..n_colors.max(1)).map(|_| generator.generate(rng)).collect()
}

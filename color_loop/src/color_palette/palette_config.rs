// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Configuration types for building and randomizing a [`crate::ColorPalette`].

use serde::{Deserialize, Serialize};

use crate::{Color, ColorInput, InterpolationMode};

pub mod palette_defaults {
    use crate::Color;

    /// Minimum CIEDE2000 distance between consecutive randomly generated colors.
    pub const DEFAULT_DELTA_E_THRESHOLD: f32 = 20.0;

    /// Upper bound on the number of (real) colors in a palette.
    pub const DEFAULT_MAX_NUMBER_OF_COLORS: usize = 8;

    /// Number of samples in a rendered scale.
    pub const DEFAULT_N_STEPS: usize = 2048;

    /// Candidates drawn per random color before the best one seen is accepted.
    pub const DEFAULT_MAX_RANDOM_ATTEMPTS: usize = 64;

    /// Used when a palette is built from an empty list of colors. This is CSS `green`.
    #[must_use]
    pub fn fallback_color() -> Color { Color::from_u8(0, 128, 0) }
}

use palette_defaults::{DEFAULT_DELTA_E_THRESHOLD, DEFAULT_MAX_NUMBER_OF_COLORS,
                       DEFAULT_N_STEPS};

/// Where the colors of a new palette come from. Exactly one source is used.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteColors {
    /// Caller input that still has to be parsed (and normalized into a closed loop).
    Inputs(Vec<ColorInput>),
    /// Colors that are already parsed. They are still closed into a loop if needed.
    Normalized(Vec<Color>),
    /// `n_colors` independent random colors.
    Random { n_colors: usize },
}

impl Default for PaletteColors {
    fn default() -> Self { Self::Inputs(vec![]) }
}

/// Everything needed to construct a [`crate::ColorPalette`].
///
/// `n_steps` and `max_number_of_colors` are clamped to at least `1` on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteConfig {
    pub colors: PaletteColors,
    pub mode: InterpolationMode,
    pub n_steps: usize,
    pub delta_e_threshold: f32,
    pub max_number_of_colors: usize,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: PaletteColors::default(),
            mode: InterpolationMode::default(),
            n_steps: DEFAULT_N_STEPS,
            delta_e_threshold: DEFAULT_DELTA_E_THRESHOLD,
            max_number_of_colors: DEFAULT_MAX_NUMBER_OF_COLORS,
        }
    }
}

impl PaletteConfig {
    /// Palette from caller color input, with the default threshold and capacity.
    pub fn from_inputs<I, C>(inputs: I, mode: InterpolationMode, n_steps: usize) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColorInput>,
    {
        Self {
            colors: PaletteColors::Inputs(inputs.into_iter().map(Into::into).collect()),
            mode,
            n_steps,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_max_number_of_colors(mut self, max_number_of_colors: usize) -> Self {
        self.max_number_of_colors = max_number_of_colors;
        self
    }

    #[must_use]
    pub fn with_delta_e_threshold(mut self, delta_e_threshold: f32) -> Self {
        self.delta_e_threshold = delta_e_threshold;
        self
    }
}

/// Options for randomizing a whole palette.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomPaletteConfig {
    /// How many colors to generate. Defaults to the current number of colors, and is
    /// always clamped to the palette's capacity.
    pub n_colors: Option<usize>,
    /// Floor for the HSV value of each generated color, in `[0, 1]`.
    pub min_brightness: f32,
}

/// Options for generating a single random color.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomColorConfig {
    /// Floor for the HSV value of the generated color, in `[0, 1]`.
    pub min_brightness: f32,
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Configuration for [`crate::Theme`]. Everything except a runtime
//! [`InitialThemeColors::Palette`] can be loaded from JSON (or any other serde format).

use serde::{Deserialize, Serialize};

use crate::{ColorInput, ColorPalette, InterpolationMode, PaletteError, PaletteResult,
            RandomColorConfig, RandomPaletteConfig,
            palette_defaults::{DEFAULT_DELTA_E_THRESHOLD, DEFAULT_MAX_NUMBER_OF_COLORS,
                               DEFAULT_N_STEPS}};

pub mod theme_defaults {
    /// Random colors in a theme created without explicit colors.
    pub const DEFAULT_N_COLORS: usize = 5;

    /// Default blend rate, before it is clamped and scaled down.
    pub const DEFAULT_TRANSITION_SPEED: f32 = 0.1;

    /// The clamped transition speed is divided by this to get the per tick mix fraction.
    pub const TRANSITION_SPEED_DIVISOR: f32 = 10.0;

    /// A transition is complete once the average distance to the target changes by less
    /// than this between two ticks.
    pub const COLOR_DISTANCE_THRESHOLD: f32 = 0.001;
}

use theme_defaults::{DEFAULT_N_COLORS, DEFAULT_TRANSITION_SPEED};

/// Where the first palette of a theme comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialThemeColors {
    /// Reuse the colors of an existing palette. The theme rebuilds it with its own
    /// `n_steps` (and `mode`, if one is configured).
    #[serde(skip)]
    Palette(ColorPalette),
    Colors(Vec<ColorInput>),
    Random { n_colors: usize },
}

impl Default for InitialThemeColors {
    fn default() -> Self {
        Self::Random {
            n_colors: DEFAULT_N_COLORS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub initial: InitialThemeColors,
    pub n_steps: usize,
    /// When `None`, a theme built from a palette keeps that palette's mode, and any
    /// other theme uses [`InterpolationMode::Rgb`].
    pub mode: Option<InterpolationMode>,
    pub delta_e_threshold: f32,
    pub max_number_of_colors: usize,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            initial: InitialThemeColors::default(),
            n_steps: DEFAULT_N_STEPS,
            mode: None,
            delta_e_threshold: DEFAULT_DELTA_E_THRESHOLD,
            max_number_of_colors: DEFAULT_MAX_NUMBER_OF_COLORS,
        }
    }
}

impl ThemeConfig {
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidConfig`] if `json` is not a valid theme config.
    pub fn try_from_json(json: &str) -> PaletteResult<Self> {
        serde_json::from_str(json).map_err(|err| PaletteError::InvalidConfig {
            reason: err.to_string(),
        })
    }
}

/// Options accepted by every theme mutator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorUpdateConfig {
    /// Blend rate toward the new palette. Clamped to `[0, 1]`; higher is faster.
    pub transition_speed: f32,
}

impl Default for ColorUpdateConfig {
    fn default() -> Self {
        Self {
            transition_speed: DEFAULT_TRANSITION_SPEED,
        }
    }
}

impl ColorUpdateConfig {
    #[must_use]
    pub fn with_transition_speed(transition_speed: f32) -> Self { Self { transition_speed } }
}

/// [`RandomPaletteConfig`] plus the transition options, for [`crate::Theme::random_from`]
/// and [`crate::Theme::random_theme`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomThemeConfig {
    #[serde(flatten)]
    pub palette: RandomPaletteConfig,
    #[serde(flatten)]
    pub update: ColorUpdateConfig,
}

/// [`RandomColorConfig`] plus the transition options, for
/// [`crate::Theme::push_random_color`] and [`crate::Theme::rotate_random_color`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomThemeColorConfig {
    #[serde(flatten)]
    pub color: RandomColorConfig,
    #[serde(flatten)]
    pub update: ColorUpdateConfig,
}

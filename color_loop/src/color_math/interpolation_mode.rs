// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use strum::EnumCount;

/// The color space in which colors are interpolated (when rendering a palette's scale)
/// and mixed (when a theme blends toward its target palette).
///
/// `Lch` and `Hcl` describe the same space; both are kept so that mode rotation visits
/// the same cycle of 8 modes as other palette tools.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumCount,
    strum_macros::AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMode {
    #[default]
    Rgb,
    Lab,
    Lrgb,
    Hsl,
    Lch,
    Hsv,
    Hsi,
    Hcl,
}

impl InterpolationMode {
    /// Rotation order used by [`InterpolationMode::next`].
    pub const ALL: [InterpolationMode; InterpolationMode::COUNT] = [
        InterpolationMode::Rgb,
        InterpolationMode::Lab,
        InterpolationMode::Lrgb,
        InterpolationMode::Hsl,
        InterpolationMode::Lch,
        InterpolationMode::Hsv,
        InterpolationMode::Hsi,
        InterpolationMode::Hcl,
    ];

    /// The mode after this one, wrapping from `hcl` back to `rgb`.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|mode| *mode == self)
            .unwrap_or_default();
        Self::ALL[(index + 1) % Self::COUNT]
    }
}

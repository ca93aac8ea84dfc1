// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The [`Color`] value type, and its conversions into the color spaces provided by the
//! [`palette`] crate.

use std::fmt::{Display, Formatter, Result, Write as _};

use palette::{FromColor, Hsv, Lab, Srgb, color_difference::Ciede2000};
use serde::{Deserialize, Serialize};

/// Amount of Lab lightness removed per unit of [`Color::darken`].
pub const LAB_DARKEN_STEP: f32 = 18.0;

/// An opaque sRGB color with `f32` channels in `[0, 1]`.
///
/// Colors parsed from text or drawn by the random generator sit exactly on the 8-bit
/// grid. Colors produced by interpolation (scale samples, blended theme colors) may sit
/// between grid points; [`Color::hex`] rounds them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self { Self::from_u8(red, green, blue) }
}

impl From<Srgb> for Color {
    fn from(srgb: Srgb) -> Self {
        Self {
            red: srgb.red,
            green: srgb.green,
            blue: srgb.blue,
        }
    }
}

impl From<Color> for Srgb {
    fn from(color: Color) -> Self { Srgb::new(color.red, color.green, color.blue) }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { write!(f, "{}", self.hex()) }
}

impl Color {
    #[must_use]
    pub fn from_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: f32::from(red) / 255.0,
            green: f32::from(green) / 255.0,
            blue: f32::from(blue) / 255.0,
        }
    }

    /// Rounds each channel to the nearest 8-bit value (channels are clamped first).
    #[must_use]
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        ]
    }

    /// Snaps this color onto the 8-bit grid, so that it round trips through
    /// [`Color::hex`] unchanged.
    #[must_use]
    pub fn quantize(&self) -> Self {
        let [red, green, blue] = self.to_rgb8();
        Self::from_u8(red, green, blue)
    }

    /// Lowercase `#rrggbb` string.
    #[must_use]
    pub fn hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        let mut acc = String::with_capacity(7);
        _ = write!(acc, "#{r:02x}{g:02x}{b:02x}");
        acc
    }

    #[must_use]
    pub fn to_lab(&self) -> Lab { Lab::from_color(Srgb::from(*self)) }

    #[must_use]
    pub fn from_lab(lab: Lab) -> Self { Srgb::from_color(lab).into() }

    /// The `v` component of this color in HSV, in `[0, 1]`. This is what the brightness
    /// floor of random color generation is checked against.
    #[must_use]
    pub fn hsv_value(&self) -> f32 { Hsv::from_color(Srgb::from(*self)).value }

    /// Perceptual distance to `other` using CIEDE2000. `0` means identical, and `100` is
    /// roughly the distance between black and white.
    #[must_use]
    pub fn delta_e(&self, other: &Color) -> f32 { self.to_lab().difference(other.to_lab()) }

    /// Reduces the Lab lightness by `amount` steps of [`LAB_DARKEN_STEP`]. An amount of
    /// `0` returns the color unchanged.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn darken(&self, amount: f32) -> Self {
        if amount == 0.0 {
            return *self;
        }
        let mut lab = self.to_lab();
        lab.l -= LAB_DARKEN_STEP * amount;
        Self::from_lab(lab)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel_to_u8(channel: f32) -> u8 {
    if channel.is_nan() {
        return 0;
    }
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

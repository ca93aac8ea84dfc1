// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mode aware mixing of two colors, and sampling a closed loop of colors into a scale.
//!
//! - [`mix_colors`] - move one color a fraction of the way toward another, in any
//!   [`InterpolationMode`]. Used for scale rendering and for theme transitions.
//! - [`sample_loop`] - render `n_steps` evenly spaced samples of a color loop.

use palette::{FromColor, Hsl, Hsv, Lab, Lch, LinSrgb, Srgb};

use super::{Color, Hsi, InterpolationMode};

/// Chroma (for LCh) or saturation (for HSL / HSV) below this has no meaningful hue.
const ACHROMATIC_EPSILON: f32 = 1e-4;

/// Returns the color `fraction` of the way from `from` to `to`, interpolated in `mode`.
/// A `fraction` of `0` yields `from` and `1` yields `to` (modulo gamut clamping for the
/// non RGB spaces).
#[must_use]
pub fn mix_colors(from: Color, to: Color, fraction: f32, mode: InterpolationMode) -> Color {
    match mode {
        InterpolationMode::Rgb => Color {
            red: lerp(from.red, to.red, fraction),
            green: lerp(from.green, to.green, fraction),
            blue: lerp(from.blue, to.blue, fraction),
        },
        InterpolationMode::Lrgb => {
            let from: LinSrgb = Srgb::from(from).into_linear();
            let to: LinSrgb = Srgb::from(to).into_linear();
            let mixed = LinSrgb::new(
                lerp(from.red, to.red, fraction),
                lerp(from.green, to.green, fraction),
                lerp(from.blue, to.blue, fraction),
            );
            Srgb::from_linear(mixed).into()
        }
        InterpolationMode::Lab => {
            let from = from.to_lab();
            let to = to.to_lab();
            Color::from_lab(Lab::new(
                lerp(from.l, to.l, fraction),
                lerp(from.a, to.a, fraction),
                lerp(from.b, to.b, fraction),
            ))
        }
        InterpolationMode::Lch | InterpolationMode::Hcl => {
            let mixed = Polar::from_lch(from).mix(Polar::from_lch(to), fraction);
            let lch = Lch::new(mixed.axial, mixed.radial, mixed.hue.unwrap_or(0.0));
            Srgb::from_color(lch).into()
        }
        InterpolationMode::Hsl => {
            let mixed = Polar::from_hsl(from).mix(Polar::from_hsl(to), fraction);
            let hsl = Hsl::new(mixed.hue.unwrap_or(0.0), mixed.radial, mixed.axial);
            Srgb::from_color(hsl).into()
        }
        InterpolationMode::Hsv => {
            let mixed = Polar::from_hsv(from).mix(Polar::from_hsv(to), fraction);
            let hsv = Hsv::new(mixed.hue.unwrap_or(0.0), mixed.radial, mixed.axial);
            Srgb::from_color(hsv).into()
        }
        InterpolationMode::Hsi => {
            let from = Hsi::from(from);
            let to = Hsi::from(to);
            let hue = mix_optional_hue(from.hue, to.hue, fraction);
            Color::from(Hsi {
                hue,
                saturation: lerp(from.saturation, to.saturation, fraction),
                intensity: lerp(from.intensity, to.intensity, fraction),
            })
        }
    }
}

/// Renders a closed loop of `colors` into `n_steps` samples.
///
/// The colors are spread evenly over the domain `[0, n_steps]`, `n_steps + 1` points are
/// sampled, and the last one (which repeats the first color of the loop) is dropped.
/// The result always has exactly `n_steps` entries.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn sample_loop(colors: &[Color], n_steps: usize, mode: InterpolationMode) -> Vec<Color> {
    match colors {
        [] => return vec![Color::default(); n_steps],
        [only] => return vec![*only; n_steps],
        _ => {}
    }

    let segments = colors.len() - 1;
    (0..n_steps)
        .map(|step| {
            let position = step as f64 / n_steps as f64 * segments as f64;
            let index = (position.floor() as usize).min(segments - 1);
            let fraction = (position - index as f64) as f32;
            mix_colors(colors[index], colors[index + 1], fraction, mode)
        })
        .collect()
}

fn lerp(from: f32, to: f32, fraction: f32) -> f32 { from + (to - from) * fraction }

/// Moves along the shorter arc between two hues (in degrees).
fn mix_hue(from: f32, to: f32, fraction: f32) -> f32 {
    let mut delta = to - from;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    (from + fraction * delta).rem_euclid(360.0)
}

/// A gray has no hue, so it borrows the hue of the other side. This keeps a blend from
/// red to white from drifting through other hues.
fn mix_optional_hue(from: Option<f32>, to: Option<f32>, fraction: f32) -> Option<f32> {
    match (from, to) {
        (Some(from), Some(to)) => Some(mix_hue(from, to, fraction)),
        (Some(hue), None) | (None, Some(hue)) => Some(hue),
        (None, None) => None,
    }
}

/// Cylindrical color coordinates shared by LCh, HSL, and HSV. `radial` is the chroma or
/// saturation, and `axial` is the lightness or value.
#[derive(Debug, Clone, Copy)]
struct Polar {
    hue: Option<f32>,
    radial: f32,
    axial: f32,
}

impl Polar {
    fn new(hue: f32, radial: f32, axial: f32) -> Self {
        Self {
            hue: (radial > ACHROMATIC_EPSILON).then_some(hue),
            radial,
            axial,
        }
    }

    fn from_lch(color: Color) -> Self {
        let lch = Lch::from_color(color.to_lab());
        Self::new(lch.hue.into_positive_degrees(), lch.chroma, lch.l)
    }

    fn from_hsl(color: Color) -> Self {
        let hsl = Hsl::from_color(Srgb::from(color));
        Self::new(hsl.hue.into_positive_degrees(), hsl.saturation, hsl.lightness)
    }

    fn from_hsv(color: Color) -> Self {
        let hsv = Hsv::from_color(Srgb::from(color));
        Self::new(hsv.hue.into_positive_degrees(), hsv.saturation, hsv.value)
    }

    fn mix(self, other: Self, fraction: f32) -> Self {
        Self {
            hue: mix_optional_hue(self.hue, other.hue, fraction),
            radial: lerp(self.radial, other.radial, fraction),
            axial: lerp(self.axial, other.axial, fraction),
        }
    }
}

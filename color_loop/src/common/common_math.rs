// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Small numeric helpers shared by the palette and theme modules:
//! - [`clamp_f32`] - clamp that tolerates swapped bounds and `NaN` input.
//! - [`safe_mod`] - floor-consistent modulo used to wrap wheel indices.
//! - [`RangeMapping`] - linear mapping between two ranges, and the brightness to darken
//!   factor mapping built on top of it.

/// Clamps `value` into the range described by `bound_a` and `bound_b`. The bounds may be
/// passed in either order. `NaN` is treated as the lower bound so that a bad input
/// degrades into a valid setting rather than poisoning later math.
///
/// ```
/// use color_loop::clamp_f32;
/// assert_eq!(clamp_f32(1.5, 0.0, 1.0), 1.0);
/// assert_eq!(clamp_f32(0.5, 1.0, 0.0), 0.5);
/// assert_eq!(clamp_f32(f32::NAN, 0.0, 1.0), 0.0);
/// ```
#[must_use]
pub fn clamp_f32(value: f32, bound_a: f32, bound_b: f32) -> f32 {
    let (min, max) = if bound_a > bound_b {
        (bound_b, bound_a)
    } else {
        (bound_a, bound_b)
    };
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Modulo that never returns a negative result, so that walking backwards around the
/// color wheel wraps to the end instead of going out of bounds. A `modulus` of zero
/// yields zero.
///
/// ```
/// use color_loop::safe_mod;
/// assert_eq!(safe_mod(-5, 3), 1);
/// assert_eq!(safe_mod(5, 3), 2);
/// ```
#[must_use]
pub fn safe_mod(value: i64, modulus: usize) -> usize {
    let Ok(modulus) = i64::try_from(modulus) else {
        return 0;
    };
    if modulus == 0 {
        return 0;
    }
    // `rem_euclid` with a positive modulus is always in `[0, modulus)`.
    usize::try_from(value.rem_euclid(modulus)).unwrap_or_default()
}

/// Linear mapping from `in_range` to `out_range`. The ranges can be reversed (eg: `[0,
/// 1] -> [3, 0]`) to invert the direction of the mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeMapping {
    pub in_range: (f32, f32),
    pub out_range: (f32, f32),
}

impl RangeMapping {
    #[must_use]
    pub const fn new(in_range: (f32, f32), out_range: (f32, f32)) -> Self {
        Self {
            in_range,
            out_range,
        }
    }

    #[must_use]
    pub fn map(&self, value: f32) -> f32 {
        let in_width = self.in_range.1 - self.in_range.0;
        let out_width = self.out_range.1 - self.out_range.0;
        let fraction = (value - self.in_range.0) / in_width;
        self.out_range.0 + out_width * fraction
    }
}

/// Brightness `1.0` means "leave the color alone", and `0.0` means "darken as far as the
/// Lab darken step allows" (a factor of 3).
pub const BRIGHTNESS_TO_DARKEN_FACTOR: RangeMapping =
    RangeMapping::new((0.0, 1.0), (3.0, 0.0));

/// Maps a brightness value in `[0, 1]` to a darken factor in `[3, 0]`.
#[must_use]
pub fn map_brightness_to_darken_factor(brightness: f32) -> f32 {
    BRIGHTNESS_TO_DARKEN_FACTOR.map(brightness)
}

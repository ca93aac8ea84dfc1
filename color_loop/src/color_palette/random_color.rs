// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Random color generation with a brightness floor and a minimum perceptual distance
//! from a set of reference colors.
//!
//! The brightness floor is met by construction: the HSV value is drawn from
//! `[min_brightness, 1]`, so no rejection loop is needed for it. The distance constraint
//! does need rejection sampling, and that loop is bounded by
//! [`RandomColorGenerator::max_attempts`]. When no candidate clears the threshold (eg:
//! the threshold is larger than any distance in the reachable gamut), the most distant
//! candidate seen is returned instead of looping forever.

use palette::{FromColor, Hsv, Srgb};
use rand::Rng;

use super::palette_defaults::DEFAULT_MAX_RANDOM_ATTEMPTS;
use crate::{Color, DEBUG_COLOR_LOOP, clamp_f32};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomColorGenerator {
    /// Minimum CIEDE2000 distance from every reference color.
    pub delta_e_threshold: f32,
    /// Floor for the HSV value of generated colors, in `[0, 1]`.
    pub min_brightness: f32,
    /// Candidates drawn before giving up on the distance threshold.
    pub max_attempts: usize,
}

impl RandomColorGenerator {
    /// Negative thresholds are treated as `0` and the brightness floor is clamped into
    /// `[0, 1]`.
    #[must_use]
    pub fn new(delta_e_threshold: f32, min_brightness: f32) -> Self {
        Self {
            delta_e_threshold: delta_e_threshold.max(0.0),
            min_brightness: clamp_f32(min_brightness, 0.0, 1.0),
            max_attempts: DEFAULT_MAX_RANDOM_ATTEMPTS,
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Any color whose HSV value is at least [`Self::min_brightness`]. The result sits on
    /// the 8-bit grid.
    pub fn generate(&self, rng: &mut impl Rng) -> Color {
        let hue = rng.random_range(0.0_f32..360.0);
        let saturation = rng.random_range(0.0_f32..=1.0);
        let value = rng.random_range(self.value_floor()..=1.0);
        Color::from(Srgb::from_color(Hsv::new(hue, saturation, value))).quantize()
    }

    /// A color at least [`Self::delta_e_threshold`] away from each of `references`. With
    /// no references, this is the same as [`Self::generate`].
    pub fn generate_distinct_from(&self, references: &[Color], rng: &mut impl Rng) -> Color {
        let mut best: Option<(Color, f32)> = None;

        for _ in 0..self.max_attempts.max(1) {
            let candidate = self.generate(rng);
            let distance = min_distance(&candidate, references);
            if distance >= self.delta_e_threshold {
                return candidate;
            }
            if best.is_none_or(|(_, best_distance)| distance > best_distance) {
                best = Some((candidate, distance));
            }
        }

        match best {
            Some((candidate, distance)) => {
                DEBUG_COLOR_LOOP.then(|| {
                    // % is Display, ? is Debug.
                    tracing::debug!(
                        message = "🎲 No random color cleared the distance threshold, using the most distant one",
                        threshold = %self.delta_e_threshold,
                        distance = %distance,
                        color = %candidate,
                    );
                });
                candidate
            }
            None => self.generate(rng),
        }
    }

    /// The brightness floor rounded up to the 8-bit grid, so that quantizing a generated
    /// color can never push it below [`Self::min_brightness`].
    fn value_floor(&self) -> f32 {
        ((self.min_brightness * 255.0).ceil() / 255.0).min(1.0)
    }
}

fn min_distance(candidate: &Color, references: &[Color]) -> f32 {
    references
        .iter()
        .map(|reference| reference.delta_e(candidate))
        .fold(f32::INFINITY, f32::min)
}

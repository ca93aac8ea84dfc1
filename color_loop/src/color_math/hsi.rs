// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! HSI (hue, saturation, intensity). The [`palette`] crate has no HSI type, so this is
//! the one conversion that lives here. Intensity is the plain channel average, which
//! makes HSI blends keep the overall light output of LED strips steady.

use std::f32::consts::{PI, TAU};

use super::Color;

/// Saturation below this is treated as gray (no meaningful hue).
const ACHROMATIC_EPSILON: f32 = 1e-6;

/// HSI components. `hue` is in degrees `[0, 360)` and is `None` for grays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsi {
    pub hue: Option<f32>,
    pub saturation: f32,
    pub intensity: f32,
}

impl From<Color> for Hsi {
    fn from(color: Color) -> Self {
        let Color { red, green, blue } = color;
        let min = red.min(green).min(blue);
        let intensity = (red + green + blue) / 3.0;
        let saturation = if intensity > 0.0 { 1.0 - min / intensity } else { 0.0 };

        let hue = if saturation <= ACHROMATIC_EPSILON {
            None
        } else {
            let numerator = ((red - green) + (red - blue)) / 2.0;
            let denominator =
                ((red - green) * (red - green) + (red - blue) * (green - blue)).sqrt();
            let mut angle = (numerator / denominator).clamp(-1.0, 1.0).acos();
            if blue > green {
                angle = TAU - angle;
            }
            let degrees = (angle / TAU * 360.0).rem_euclid(360.0);
            degrees.is_finite().then_some(degrees)
        };

        Self {
            hue,
            saturation,
            intensity,
        }
    }
}

impl From<Hsi> for Color {
    fn from(hsi: Hsi) -> Self {
        let Hsi {
            hue,
            saturation,
            intensity,
        } = hsi;
        let turn = hue.unwrap_or(0.0).rem_euclid(360.0) / 360.0;
        let saturation = saturation.clamp(0.0, 1.0);

        // Each third of the hue circle has one channel pinned to the minimum.
        let sector = |turn: f32| {
            let low = (1.0 - saturation) / 3.0;
            let high = (1.0 + saturation * (TAU * turn).cos() / (PI / 3.0 - TAU * turn).cos())
                / 3.0;
            (low, high, 1.0 - (low + high))
        };

        let (red, green, blue) = if turn < 1.0 / 3.0 {
            let (blue, red, green) = sector(turn);
            (red, green, blue)
        } else if turn < 2.0 / 3.0 {
            let (red, green, blue) = sector(turn - 1.0 / 3.0);
            (red, green, blue)
        } else {
            let (green, blue, red) = sector(turn - 2.0 / 3.0);
            (red, green, blue)
        };

        let limit = |channel: f32| (intensity * channel * 3.0).clamp(0.0, 1.0);
        Color {
            red: limit(red),
            green: limit(green),
            blue: limit(blue),
        }
    }
}

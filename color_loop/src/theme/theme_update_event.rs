// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use crate::{Color, ColorPalette, InterpolationMode};

/// Snapshot of a [`crate::Theme`], handed to subscribers after each accepted palette
/// change, each completed transition, and each brightness change.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeUpdateEvent {
    /// The active palette: the transition target if one is in flight.
    pub palette: ColorPalette,
    /// The rendered scale of [`Self::palette`]. Shared, not copied.
    pub colors: Arc<[Color]>,
    pub mode: InterpolationMode,
    /// Theme wide brightness in `[0, 1]`.
    pub brightness: f32,
}

impl ThemeUpdateEvent {
    #[must_use]
    pub fn hexes(&self) -> &[String] { &self.palette.hexes()[..self.palette.n_colors()] }
}

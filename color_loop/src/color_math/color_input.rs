// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`ColorInput`] is what callers hand to palette and theme operations: either text that
//! still needs parsing, or a [`Color`] that is ready to use.

use serde::{Deserialize, Serialize};

use super::Color;
use crate::{PaletteError, PaletteResult};

/// Text (CSS hex, named color, `rgb()`, `hsl()`, ...) or an already parsed [`Color`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorInput {
    Text(String),
    Color(Color),
}

impl From<&str> for ColorInput {
    fn from(text: &str) -> Self { Self::Text(text.to_string()) }
}

impl From<String> for ColorInput {
    fn from(text: String) -> Self { Self::Text(text) }
}

impl From<&String> for ColorInput {
    fn from(text: &String) -> Self { Self::Text(text.clone()) }
}

impl From<Color> for ColorInput {
    fn from(color: Color) -> Self { Self::Color(color) }
}

impl ColorInput {
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidColor`] if the text is not a color the color
    /// library understands.
    pub fn to_color(&self) -> PaletteResult<Color> {
        match self {
            ColorInput::Color(color) => Ok(*color),
            ColorInput::Text(text) => parse_color(text),
        }
    }
}

/// Parses CSS color text with [`colorgrad`]. The result sits on the 8-bit grid, so its
/// hex string is stable.
///
/// # Errors
///
/// Returns [`PaletteError::InvalidColor`] if the text is not a color the color library
/// understands.
pub fn parse_color(text: &str) -> PaletteResult<Color> {
    let parsed = text
        .trim()
        .parse::<colorgrad::Color>()
        .map_err(|err| PaletteError::invalid_color(text, err))?;
    let [red, green, blue, _alpha] = parsed.to_rgba8();
    Ok(Color::from_u8(red, green, blue))
}

/// Parses every input, stopping at the first one that fails.
///
/// # Errors
///
/// Returns [`PaletteError::InvalidColor`] for the first unparsable input.
pub fn parse_color_inputs(inputs: &[ColorInput]) -> PaletteResult<Vec<Color>> {
    inputs.iter().map(ColorInput::to_color).collect()
}

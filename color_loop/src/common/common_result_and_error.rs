// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Error type for the crate. Only two things can actually fail: turning caller supplied
//! text into a color, and turning caller supplied text into a theme config. Everything
//! else (degenerate palettes, over capacity pushes, out of range speeds or brightness) is
//! clamped or treated as a no-op so the animation loop keeps running.
//!
//! For more information on error types, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)

/// Type alias for results produced by palette and theme operations that parse input.
pub type PaletteResult<T> = Result<T, PaletteError>;

/// Errors that can occur at the boundary where caller input is parsed.
///
/// | Variant           | Cause                                                   |
/// | :---------------- | :------------------------------------------------------ |
/// | [`InvalidColor`]  | A color string could not be parsed by the color library |
/// | [`InvalidConfig`] | A serialized theme config could not be deserialized     |
///
/// [`InvalidColor`]: Self::InvalidColor
/// [`InvalidConfig`]: Self::InvalidConfig
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum PaletteError {
    /// The color library rejected the input string.
    #[error("🎨 Could not parse color: '{input}' ({reason})")]
    #[diagnostic(
        code(color_loop::color::invalid),
        help(
            "Use a CSS color: a hex code like `#ff0000` or `#f00`, a named color like \
             `green`, or a functional form like `rgb(255, 0, 0)`"
        )
    )]
    InvalidColor { input: String, reason: String },

    /// The theme config text is not valid.
    #[error("📑 Could not read theme config ({reason})")]
    #[diagnostic(code(color_loop::config::invalid))]
    InvalidConfig { reason: String },
}

impl PaletteError {
    pub fn invalid_color(input: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidColor {
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}

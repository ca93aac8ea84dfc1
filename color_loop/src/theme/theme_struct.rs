// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`Theme`] owns the active [`ColorPalette`], an optional target palette, and a working
//! copy of the colors that is blended toward the target one [`Theme::tick`] at a time.
//!
//! # State machine
//!
//! ```text
//!              mutator (result differs)
//!   ┌──────┐ ─────────────────────────▶ ┌────────────────┐
//!   │ Idle │                            │ Transitioning  │ ◀─┐ mutator (redirect:
//!   └──────┘ ◀───────────────────────── └────────────────┘ ──┘ commit old target)
//!              tick (distance stalled)
//! ```
//!
//! While a transition is in flight, [`Theme::active_palette`] is the target, so every
//! mutator builds on the palette the theme is heading to rather than the one it is
//! leaving.

use crate::{Color, ColorInput, ColorPalette, ColorUpdateConfig, DEBUG_COLOR_LOOP,
            InitialThemeColors, InterpolationMode, PaletteColors, PaletteConfig,
            PaletteResult, RandomPaletteConfig, RandomThemeColorConfig, RandomThemeConfig,
            SubscriberId, SubscriberList, ThemeConfig, ThemeUpdateEvent, clamp_f32,
            map_brightness_to_darken_factor, mix_colors, ok, safe_mod,
            theme_defaults::{COLOR_DISTANCE_THRESHOLD, DEFAULT_N_COLORS,
                             TRANSITION_SPEED_DIVISOR}};

/// An index into the color wheel: any integer, or a float that is rounded to the nearest
/// integer with halves rounding up (so `-0.5` and `0.5` land on `0` and `1`).
pub trait WheelIndex {
    fn round_to_i64(self) -> i64;
}

impl WheelIndex for i64 {
    fn round_to_i64(self) -> i64 { self }
}

macro_rules! impl_wheel_index_lossless {
    ($($ty:ty),*) => {$(
        impl WheelIndex for $ty {
            fn round_to_i64(self) -> i64 { i64::from(self) }
        }
    )*};
}

impl_wheel_index_lossless!(i8, i16, i32, u8, u16, u32);

macro_rules! impl_wheel_index_wrapping {
    ($($ty:ty),*) => {$(
        impl WheelIndex for $ty {
            #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            fn round_to_i64(self) -> i64 { self as i64 }
        }
    )*};
}

impl_wheel_index_wrapping!(isize, u64, usize);

impl WheelIndex for f64 {
    #[allow(clippy::cast_possible_truncation)]
    fn round_to_i64(self) -> i64 { (self + 0.5).floor() as i64 }
}

impl WheelIndex for f32 {
    fn round_to_i64(self) -> i64 { f64::from(self).round_to_i64() }
}

#[derive(Debug)]
pub struct Theme {
    n_steps: usize,
    max_number_of_colors: usize,
    palette: ColorPalette,
    target_palette: Option<ColorPalette>,
    mode: InterpolationMode,
    brightness: f32,
    /// Per tick mix fraction, already clamped and scaled down.
    transition_speed: f32,
    /// Rotation offset, advanced by [`Theme::tick`].
    i_color: i64,
    previous_color_distance: Option<f32>,
    /// Working copy of the scale. Starts as the active palette's scale and drifts toward
    /// the target's scale during a transition.
    colors: Vec<Color>,
    subscribers: SubscriberList<ThemeUpdateEvent>,
}

impl Default for Theme {
    fn default() -> Self { Self::random(DEFAULT_N_COLORS, ThemeConfig::default()) }
}

/// Construction.
impl Theme {
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidColor`] if the initial colors can't be
    /// parsed.
    pub fn new(config: ThemeConfig) -> PaletteResult<Self> {
        let ThemeConfig {
            initial,
            n_steps,
            mode,
            delta_e_threshold,
            max_number_of_colors,
        } = config;
        let n_steps = n_steps.max(1);
        let max_number_of_colors = max_number_of_colors.max(1);
        let palette_config = |colors: PaletteColors, mode: InterpolationMode| PaletteConfig {
            colors,
            mode,
            n_steps,
            delta_e_threshold,
            max_number_of_colors,
        };

        let palette = match initial {
            InitialThemeColors::Palette(palette) => ColorPalette::try_new(palette_config(
                PaletteColors::Normalized(palette.colors().to_vec()),
                mode.unwrap_or(palette.mode()),
            ))?,
            InitialThemeColors::Colors(inputs) => ColorPalette::try_new(palette_config(
                PaletteColors::Inputs(inputs),
                mode.unwrap_or_default(),
            ))?,
            InitialThemeColors::Random { n_colors } => ColorPalette::random(
                n_colors,
                &palette_config(PaletteColors::default(), mode.unwrap_or_default()),
            ),
        };

        Ok(Self::from_palette(palette))
    }

    /// A theme of `n_colors` random colors. `n_colors` replaces whatever
    /// `config.initial` holds, and every other setting of `config` applies as it does in
    /// [`Self::new`].
    #[must_use]
    pub fn random(n_colors: usize, config: ThemeConfig) -> Self {
        let ThemeConfig {
            n_steps,
            mode,
            delta_e_threshold,
            max_number_of_colors,
            ..
        } = config;
        Self::from_palette(ColorPalette::random(n_colors, &PaletteConfig {
            colors: PaletteColors::default(),
            mode: mode.unwrap_or_default(),
            n_steps: n_steps.max(1),
            delta_e_threshold,
            max_number_of_colors: max_number_of_colors.max(1),
        }))
    }

    fn from_palette(palette: ColorPalette) -> Self {
        Self {
            n_steps: palette.n_steps(),
            max_number_of_colors: palette.max_number_of_colors(),
            mode: palette.mode(),
            colors: palette.scale().to_vec(),
            palette,
            target_palette: None,
            brightness: 1.0,
            transition_speed: 0.0,
            i_color: 0,
            previous_color_distance: None,
            subscribers: SubscriberList::new(),
        }
    }
}

/// Reading colors and state.
impl Theme {
    /// The target palette if a transition is in flight, otherwise the current palette.
    #[must_use]
    pub fn active_palette(&self) -> &ColorPalette {
        self.target_palette.as_ref().unwrap_or(&self.palette)
    }

    /// Hexes of [`Self::active_palette`] without the loop closing duplicate.
    #[must_use]
    pub fn active_palette_hexes(&self) -> &[String] {
        let active = self.active_palette();
        &active.hexes()[..active.n_colors()]
    }

    /// The palette the theme is transitioning from (or resting on, when idle).
    #[must_use]
    pub fn palette(&self) -> &ColorPalette { &self.palette }

    #[must_use]
    pub fn target_palette(&self) -> Option<&ColorPalette> { self.target_palette.as_ref() }

    #[must_use]
    pub fn mode(&self) -> InterpolationMode { self.mode }

    #[must_use]
    pub fn n_steps(&self) -> usize { self.n_steps }

    #[must_use]
    pub fn max_number_of_colors(&self) -> usize { self.max_number_of_colors }

    /// The working colors, exactly [`Self::n_steps`] long.
    #[must_use]
    pub fn colors(&self) -> &[Color] { &self.colors }

    /// Average CIEDE2000 distance between the working colors and the target's scale, as
    /// of the last [`Self::tick`]. `None` when idle or before the first tick of a
    /// transition.
    #[must_use]
    pub fn transition_distance(&self) -> Option<f32> { self.previous_color_distance }

    /// `0` is the darkest and `1` (the default) leaves colors unchanged.
    #[must_use]
    pub fn brightness(&self) -> f32 { self.brightness }

    /// Clamps `brightness` into `[0, 1]`. Subscribers are notified if it changed.
    #[allow(clippy::float_cmp)]
    pub fn set_brightness(&mut self, brightness: f32) {
        let brightness = clamp_f32(brightness, 0.0, 1.0);
        if brightness == self.brightness {
            return;
        }
        self.brightness = brightness;
        self.publish();
    }

    /// Wraps any index (including negative ones) into `[0, n_steps)`, after rounding it
    /// to the nearest integer and applying the rotation offset.
    #[must_use]
    pub fn normalize_index(&self, index: impl WheelIndex) -> usize {
        safe_mod(index.round_to_i64().wrapping_add(self.i_color), self.n_steps)
    }

    /// The working color at `index`, darkened by the theme brightness and then by the
    /// optional per call `brightness`.
    #[must_use]
    pub fn get_color(&self, index: impl WheelIndex, brightness: Option<f32>) -> Color {
        let mut color = self
            .colors
            .get(self.normalize_index(index))
            .copied()
            .unwrap_or_default();
        if self.brightness < 1.0 {
            color = color.darken(map_brightness_to_darken_factor(self.brightness));
        }
        match brightness.map(|it| clamp_f32(it, 0.0, 1.0)) {
            Some(brightness) if brightness < 1.0 => {
                color.darken(map_brightness_to_darken_factor(brightness))
            }
            _ => color,
        }
    }

    /// What subscribers receive.
    #[must_use]
    pub fn status(&self) -> ThemeUpdateEvent {
        let active = self.active_palette();
        ThemeUpdateEvent {
            palette: active.clone(),
            colors: active.scale_arc(),
            mode: self.mode,
            brightness: self.brightness,
        }
    }
}

/// Subscriptions.
impl Theme {
    /// Returns the id needed to [`Self::unsubscribe`], and the current status.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&ThemeUpdateEvent) + Send + 'static,
    ) -> (SubscriberId, ThemeUpdateEvent) {
        let id = self.subscribers.subscribe(callback);
        (id, self.status())
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool { self.subscribers.unsubscribe(id) }

    fn publish(&mut self) {
        let status = self.status();
        self.subscribers.publish(&status);
    }
}

/// Mutators. Each one derives a candidate from [`Self::active_palette`] and hands it to
/// [`Self::update_scale`].
impl Theme {
    /// Replaces colors and mode at once.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidColor`] if any color can't be parsed.
    pub fn update(
        &mut self,
        colors: &[ColorInput],
        mode: InterpolationMode,
        config: ColorUpdateConfig,
    ) -> PaletteResult<()> {
        let candidate = self.active_palette().new_config(
            colors,
            self.n_steps,
            mode,
            Some(self.max_number_of_colors),
        )?;
        self.update_scale(candidate, config);
        ok!()
    }

    pub fn set_mode(&mut self, mode: InterpolationMode, config: ColorUpdateConfig) {
        let candidate = self.active_palette().new_mode(mode);
        self.update_scale(candidate, config);
    }

    pub fn rotate_mode(&mut self, config: ColorUpdateConfig) {
        let candidate = self.active_palette().rotate_mode();
        self.update_scale(candidate, config);
    }

    /// Colors beyond [`Self::max_number_of_colors`] are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidColor`] if any color can't be parsed.
    pub fn set_colors(
        &mut self,
        colors: &[ColorInput],
        config: ColorUpdateConfig,
    ) -> PaletteResult<()> {
        let colors = ColorPalette::clamp_colors(colors, self.max_number_of_colors);
        let candidate = self.active_palette().new_colors(&colors)?;
        self.update_scale(candidate, config);
        ok!()
    }

    /// Random colors starting from `seed`. The number of colors defaults to the current
    /// one and never exceeds [`Self::max_number_of_colors`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidColor`] if `seed` can't be parsed.
    pub fn random_from(
        &mut self,
        seed: impl Into<ColorInput>,
        config: RandomThemeConfig,
    ) -> PaletteResult<()> {
        let palette_config = self.random_palette_config(config.palette);
        let candidate = self.active_palette().randomize_from(seed, palette_config)?;
        self.update_scale(candidate, config.update);
        ok!()
    }

    /// Like [`Self::random_from`], with a random seed.
    pub fn random_theme(&mut self, config: RandomThemeConfig) {
        let palette_config = self.random_palette_config(config.palette);
        let candidate = self.active_palette().randomize(palette_config);
        self.update_scale(candidate, config.update);
    }

    /// No-op when the palette is full.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidColor`] if `color` can't be parsed.
    pub fn push_new_color(
        &mut self,
        color: impl Into<ColorInput>,
        config: ColorUpdateConfig,
    ) -> PaletteResult<()> {
        let candidate = self.active_palette().push(color)?;
        self.update_scale(candidate, config);
        ok!()
    }

    /// No-op when the palette is full.
    pub fn push_random_color(&mut self, config: RandomThemeColorConfig) {
        let candidate = self.active_palette().push_random(config.color);
        self.update_scale(candidate, config.update);
    }

    /// No-op when only one color is left.
    pub fn pop_oldest_color(&mut self, config: ColorUpdateConfig) {
        let candidate = self.active_palette().pop_oldest();
        self.update_scale(candidate, config);
    }

    /// Drops the oldest color and appends `color`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PaletteError::InvalidColor`] if `color` can't be parsed.
    pub fn rotate_color(
        &mut self,
        color: impl Into<ColorInput>,
        config: ColorUpdateConfig,
    ) -> PaletteResult<()> {
        let candidate = self.active_palette().rotate_on(color)?;
        self.update_scale(candidate, config);
        ok!()
    }

    /// Drops the oldest color and appends a random one.
    pub fn rotate_random_color(&mut self, config: RandomThemeColorConfig) {
        let candidate = self.active_palette().rotate_random_on(config.color);
        self.update_scale(candidate, config.update);
    }

    fn random_palette_config(&self, config: RandomPaletteConfig) -> RandomPaletteConfig {
        let n_colors = config
            .n_colors
            .unwrap_or(self.active_palette().n_colors())
            .min(self.max_number_of_colors);
        RandomPaletteConfig {
            n_colors: Some(n_colors),
            ..config
        }
    }

    /// Installs `candidate` as the transition target.
    ///
    /// - Idle and `candidate` equals the current palette: nothing to do.
    /// - `candidate` equals the in flight target: duplicate request, nothing to do.
    /// - Otherwise, an in flight target is first committed as the current palette (the
    ///   working colors carry on from wherever the blend got to), then `candidate`
    ///   becomes the target.
    fn update_scale(&mut self, candidate: ColorPalette, config: ColorUpdateConfig) {
        match &self.target_palette {
            None if candidate == self.palette => return,
            Some(target) if candidate == *target => return,
            _ => {}
        }

        self.mode = candidate.mode();
        self.transition_speed =
            clamp_f32(config.transition_speed, 0.0, 1.0) / TRANSITION_SPEED_DIVISOR;

        if let Some(previous_target) = self.target_palette.take() {
            DEBUG_COLOR_LOOP.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(
                    message = "🌈 Redirecting transition",
                    from = %previous_target.key(),
                    to = %candidate.key(),
                );
            });
            self.palette = previous_target;
            self.previous_color_distance = None;
        } else {
            DEBUG_COLOR_LOOP.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(
                    message = "🌈 Starting transition",
                    from = %self.palette.key(),
                    to = %candidate.key(),
                    mode = %self.mode,
                    speed = %self.transition_speed,
                );
            });
        }

        self.target_palette = Some(candidate);
        self.publish();
    }
}

/// Frame driven progress.
impl Theme {
    /// Advances the rotation offset by `n` (which may be negative), and moves an in
    /// flight transition one step closer to its target. The transition step does not
    /// depend on `n`.
    pub fn tick(&mut self, n: i64) {
        self.transition_step();
        self.i_color = self.i_color.wrapping_add(n);
    }

    #[allow(clippy::float_cmp)]
    fn transition_step(&mut self) {
        let Some(target) = self.target_palette.clone() else {
            return;
        };

        if target == self.palette {
            self.clear_target_palette();
            return;
        }

        let average_distance = self.average_distance_to(&target);
        DEBUG_COLOR_LOOP.then(|| {
            // % is Display, ? is Debug.
            tracing::trace!(message = "🌈 Transition step", distance = %average_distance);
        });

        let stalled = average_distance == 0.0
            || self.previous_color_distance.is_some_and(|previous| {
                (previous - average_distance).abs() < COLOR_DISTANCE_THRESHOLD
            });
        if stalled {
            DEBUG_COLOR_LOOP.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(message = "🌈 Transition complete", key = %target.key());
            });
            self.colors = target.scale().to_vec();
            self.palette = target;
            self.clear_target_palette();
            return;
        }

        self.previous_color_distance = Some(average_distance);
        let (speed, mode) = (self.transition_speed, self.mode);
        for (color, goal) in self.colors.iter_mut().zip(target.scale()) {
            *color = mix_colors(*color, *goal, speed, mode);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn average_distance_to(&self, target: &ColorPalette) -> f32 {
        let scale = target.scale();
        if scale.is_empty() {
            return 0.0;
        }
        let total: f32 = scale
            .iter()
            .zip(&self.colors)
            .map(|(goal, color)| goal.delta_e(color))
            .sum();
        total / scale.len() as f32
    }

    fn clear_target_palette(&mut self) {
        self.target_palette = None;
        self.previous_color_distance = None;
        self.publish();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{PaletteError, RandomColorConfig, assert_eq2};
    use test_case::test_case;

    const MAX_TICKS: usize = 10_000;

    fn inputs(colors: &[&str]) -> Vec<ColorInput> {
        colors.iter().copied().map(ColorInput::from).collect()
    }

    fn theme_with(colors: &[&str], n_steps: usize, max: usize) -> Theme {
        Theme::new(ThemeConfig {
            initial: InitialThemeColors::Colors(inputs(colors)),
            n_steps,
            max_number_of_colors: max,
            ..Default::default()
        })
        .unwrap()
    }

    fn rgb_theme() -> Theme { theme_with(&["red", "green", "blue"], 32, 8) }

    fn fast() -> ColorUpdateConfig { ColorUpdateConfig::with_transition_speed(1.0) }

    /// Ticks until the transition completes, and returns how many ticks it took.
    fn flush(theme: &mut Theme) -> usize {
        let mut ticks = 0;
        while theme.target_palette().is_some() {
            assert!(ticks < MAX_TICKS, "transition did not terminate");
            theme.tick(1);
            ticks += 1;
        }
        ticks
    }

    fn recorder(theme: &mut Theme) -> Arc<Mutex<Vec<ThemeUpdateEvent>>> {
        let events = Arc::new(Mutex::new(vec![]));
        let sink = Arc::clone(&events);
        theme.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        events
    }

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert_eq2!(theme.active_palette().n_colors(), 5);
        assert_eq2!(theme.n_steps(), 2048);
        assert_eq2!(theme.colors().len(), 2048);
        assert_eq2!(theme.mode(), InterpolationMode::Rgb);
        assert_eq2!(theme.max_number_of_colors(), 8);
        assert_eq2!(theme.brightness(), 1.0);
        assert!(theme.target_palette().is_none());
    }

    #[test]
    fn test_random_theme_constructor() {
        let theme = Theme::random(3, ThemeConfig::default());
        assert_eq2!(theme.active_palette().n_colors(), 3);
        assert_eq2!(theme.n_steps(), 2048);
    }

    #[test]
    fn test_random_theme_constructor_honors_config() {
        let theme = Theme::random(6, ThemeConfig {
            initial: InitialThemeColors::Colors(inputs(&["red"])),
            n_steps: 48,
            mode: Some(InterpolationMode::Lch),
            delta_e_threshold: 0.0,
            max_number_of_colors: 4,
        });
        assert_eq2!(theme.active_palette().n_colors(), 4);
        assert_eq2!(theme.max_number_of_colors(), 4);
        assert_eq2!(theme.n_steps(), 48);
        assert_eq2!(theme.colors().len(), 48);
        assert_eq2!(theme.mode(), InterpolationMode::Lch);
        assert!(theme.target_palette().is_none());

        let theme = Theme::random(2, ThemeConfig {
            n_steps: 0,
            max_number_of_colors: 0,
            ..Default::default()
        });
        assert_eq2!(theme.n_steps(), 1);
        assert_eq2!(theme.active_palette().n_colors(), 1);
    }

    #[test]
    fn test_named_colors_build_a_theme() {
        let mut theme = Theme::new(ThemeConfig {
            initial: InitialThemeColors::Colors(inputs(&["red", "green", "blue"])),
            ..Default::default()
        })
        .unwrap();
        assert_eq2!(theme.active_palette_hexes(), ["#ff0000", "#008000", "#0000ff"]);

        theme.pop_oldest_color(ColorUpdateConfig::default());
        assert_eq2!(theme.active_palette_hexes(), ["#008000", "#0000ff"]);
        theme.push_new_color("purple", fast()).unwrap();
        assert_eq2!(theme.active_palette_hexes(), ["#008000", "#0000ff", "#800080"]);
    }

    #[test]
    fn test_new_with_colors() {
        let theme = rgb_theme();
        assert_eq2!(theme.active_palette().n_colors(), 3);
        assert_eq2!(theme.active_palette_hexes(), ["#ff0000", "#008000", "#0000ff"]);
        assert_eq2!(theme.colors(), theme.palette().scale());
    }

    #[test]
    fn test_new_with_invalid_colors() {
        let result = Theme::new(ThemeConfig {
            initial: InitialThemeColors::Colors(inputs(&["red", "nope"])),
            ..Default::default()
        });
        assert!(matches!(result, Err(PaletteError::InvalidColor { .. })));
    }

    #[test_case(None, InterpolationMode::Lab ; "keeps palette mode")]
    #[test_case(Some(InterpolationMode::Hsv), InterpolationMode::Hsv ; "theme mode wins")]
    fn test_new_with_palette(mode: Option<InterpolationMode>, expected: InterpolationMode) {
        let palette = ColorPalette::try_new(PaletteConfig::from_inputs(
            ["red", "green", "blue"],
            InterpolationMode::Lab,
            10,
        ))
        .unwrap();
        let theme = Theme::new(ThemeConfig {
            initial: InitialThemeColors::Palette(palette.clone()),
            n_steps: 1024,
            mode,
            ..Default::default()
        })
        .unwrap();

        assert!(!theme.active_palette().ptr_eq(&palette));
        assert_eq2!(theme.active_palette().mode(), expected);
        assert_eq2!(theme.mode(), expected);
        assert_eq2!(theme.active_palette().n_steps(), 1024);
        assert_eq2!(theme.active_palette_hexes(), ["#ff0000", "#008000", "#0000ff"]);
    }

    #[test]
    fn test_new_with_mode_and_max() {
        let theme = Theme::new(ThemeConfig {
            mode: Some(InterpolationMode::Lab),
            max_number_of_colors: 7,
            n_steps: 16,
            ..Default::default()
        })
        .unwrap();
        assert_eq2!(theme.active_palette().mode(), InterpolationMode::Lab);
        assert_eq2!(theme.max_number_of_colors(), 7);
    }

    #[test]
    fn test_new_from_json_config() {
        let config =
            ThemeConfig::try_from_json(r#"{ "initial": { "colors": ["red", "blue"] }, "n_steps": 8 }"#)
                .unwrap();
        let theme = Theme::new(config).unwrap();
        assert_eq2!(theme.active_palette_hexes(), ["#ff0000", "#0000ff"]);
        assert_eq2!(theme.colors().len(), 8);
    }

    #[test]
    fn test_pop_oldest_color_stops_at_one() {
        let mut theme = rgb_theme();

        theme.pop_oldest_color(ColorUpdateConfig::default());
        assert_eq2!(theme.active_palette().n_colors(), 2);
        assert_eq2!(theme.active_palette_hexes(), ["#008000", "#0000ff"]);

        theme.pop_oldest_color(ColorUpdateConfig::default());
        assert_eq2!(theme.active_palette().n_colors(), 1);
        assert_eq2!(theme.active_palette_hexes(), ["#0000ff"]);

        theme.pop_oldest_color(ColorUpdateConfig::default());
        assert_eq2!(theme.active_palette().n_colors(), 1);
        assert_eq2!(theme.active_palette_hexes(), ["#0000ff"]);
    }

    #[test]
    fn test_always_respects_max_number_of_colors() {
        let theme = Theme::new(ThemeConfig {
            initial: InitialThemeColors::Random { n_colors: 5 },
            max_number_of_colors: 3,
            n_steps: 32,
            ..Default::default()
        })
        .unwrap();
        assert_eq2!(theme.active_palette().n_colors(), 3);
        assert_eq2!(theme.active_palette().max_number_of_colors(), 3);

        let mut theme = theme_with(&["red", "green", "blue"], 32, 3);
        let check = |theme: &Theme, expected: usize| {
            assert_eq2!(theme.active_palette().n_colors(), expected);
            assert_eq2!(theme.active_palette().max_number_of_colors(), 3);
        };

        theme.push_random_color(RandomThemeColorConfig::default());
        check(&theme, 3);
        theme.tick(1);
        check(&theme, 3);
        theme.random_theme(RandomThemeConfig::default());
        check(&theme, 3);
        theme.rotate_mode(ColorUpdateConfig::default());
        check(&theme, 3);
        theme.random_theme(RandomThemeConfig {
            palette: RandomPaletteConfig {
                n_colors: Some(5),
                min_brightness: 0.0,
            },
            ..Default::default()
        });
        check(&theme, 3);
        theme.rotate_random_color(RandomThemeColorConfig::default());
        check(&theme, 3);
        theme.push_random_color(RandomThemeColorConfig::default());
        check(&theme, 3);
        theme.pop_oldest_color(ColorUpdateConfig::default());
        theme.push_random_color(RandomThemeColorConfig::default());
        check(&theme, 3);
        theme.random_theme(RandomThemeConfig::default());
        check(&theme, 3);
        for _ in 0..10 {
            theme.tick(1);
        }
        theme.push_random_color(RandomThemeColorConfig::default());
        check(&theme, 3);
        theme.pop_oldest_color(ColorUpdateConfig::default());
        check(&theme, 2);
        for _ in 0..10 {
            theme.tick(1);
        }

        // Out of range brightness floors are clamped, not rejected.
        let bright = RandomThemeColorConfig {
            color: RandomColorConfig {
                min_brightness: 150.0,
            },
            ..Default::default()
        };
        for _ in 0..4 {
            theme.push_random_color(bright);
            check(&theme, 3);
        }
        assert!(theme.active_palette().colors()[2].hsv_value() >= 1.0);
    }

    #[test]
    fn test_transition_reaches_target() {
        let mut theme = theme_with(&["red", "green"], 32, 8);
        let start = theme.colors().to_vec();

        theme
            .set_colors(&inputs(&["blue", "yellow"]), fast())
            .unwrap();
        assert_eq2!(theme.palette().hexes(), ["#ff0000", "#008000", "#ff0000"]);
        assert_eq2!(theme.active_palette_hexes(), ["#0000ff", "#ffff00"]);
        assert_eq2!(theme.transition_distance(), None);

        theme.tick(1);
        assert!(theme.transition_distance().is_some());
        assert_ne!(theme.colors(), start.as_slice());

        flush(&mut theme);
        assert_eq2!(theme.palette().hexes(), ["#0000ff", "#ffff00", "#0000ff"]);
        assert_eq2!(theme.colors(), theme.palette().scale());
        assert_eq2!(theme.transition_distance(), None);
    }

    #[test_case(0.0 ; "zero speed")]
    #[test_case(-3.0 ; "negative speed")]
    #[test_case(0.05 ; "slow speed")]
    #[test_case(25.0 ; "speed above one")]
    fn test_transition_always_terminates(speed: f32) {
        let mut theme = theme_with(&["red", "green", "blue"], 16, 8);
        theme
            .set_colors(
                &inputs(&["black", "white"]),
                ColorUpdateConfig::with_transition_speed(speed),
            )
            .unwrap();
        flush(&mut theme);
        assert_eq2!(theme.palette().hexes(), ["#000000", "#ffffff", "#000000"]);
    }

    #[test]
    fn test_zero_speed_completes_on_second_tick() {
        let mut theme = rgb_theme();
        theme.rotate_mode(ColorUpdateConfig::with_transition_speed(0.0));
        assert_eq2!(flush(&mut theme), 2);
        assert_eq2!(theme.palette().mode(), InterpolationMode::Lab);
    }

    #[test]
    fn test_redirect_commits_old_target() {
        let mut theme = theme_with(&["red", "green"], 32, 8);
        theme.set_colors(&inputs(&["blue"]), fast()).unwrap();
        theme.tick(1);
        theme.tick(1);
        let blended = theme.colors().to_vec();

        theme.set_colors(&inputs(&["white"]), fast()).unwrap();
        assert_eq2!(theme.palette().hexes(), ["#0000ff", "#0000ff"]);
        assert_eq2!(theme.active_palette_hexes(), ["#ffffff"]);
        assert_eq2!(theme.colors(), blended.as_slice());
        assert_eq2!(theme.transition_distance(), None);

        flush(&mut theme);
        assert_eq2!(theme.palette().hexes(), ["#ffffff", "#ffffff"]);
    }

    #[test]
    fn test_redirect_back_to_current_palette() {
        let mut theme = theme_with(&["red", "green"], 32, 8);
        theme.set_colors(&inputs(&["blue"]), fast()).unwrap();
        theme.tick(1);

        theme.set_colors(&inputs(&["red", "green"]), fast()).unwrap();
        assert_eq2!(theme.active_palette_hexes(), ["#ff0000", "#008000"]);
        flush(&mut theme);
        assert_eq2!(theme.palette().hexes(), ["#ff0000", "#008000", "#ff0000"]);
    }

    #[test]
    fn test_no_op_requests_publish_nothing() {
        let mut theme = rgb_theme();
        let events = recorder(&mut theme);

        // Same colors while idle.
        theme
            .set_colors(&inputs(&["red", "green", "blue"]), fast())
            .unwrap();
        assert!(theme.target_palette().is_none());
        assert!(events.lock().unwrap().is_empty());

        // Duplicate request while in flight.
        theme.push_new_color("white", fast()).unwrap();
        let target = theme.target_palette().cloned().unwrap();
        theme.set_mode(InterpolationMode::Rgb, fast());
        assert!(theme.target_palette().unwrap().ptr_eq(&target));
        assert_eq2!(events.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_subscribers_receive_updates() {
        let mut theme = rgb_theme();
        let events = Arc::new(Mutex::new(Vec::<ThemeUpdateEvent>::new()));
        let sink = Arc::clone(&events);
        let (id, status) = theme.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        assert_eq2!(status.hexes(), ["#ff0000", "#008000", "#0000ff"]);
        assert_eq2!(status.colors.len(), 32);

        theme.rotate_color("white", fast()).unwrap();
        {
            let events = events.lock().unwrap();
            assert_eq2!(events.len(), 1);
            assert_eq2!(events[0].hexes(), ["#008000", "#0000ff", "#ffffff"]);
        }

        flush(&mut theme);
        assert_eq2!(events.lock().unwrap().len(), 2);

        theme.set_brightness(0.5);
        theme.set_brightness(0.5);
        {
            let events = events.lock().unwrap();
            assert_eq2!(events.len(), 3);
            assert_eq2!(events[2].brightness, 0.5);
        }

        assert!(theme.unsubscribe(id));
        theme.rotate_mode(fast());
        assert_eq2!(events.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_update_changes_colors_and_mode() {
        let mut theme = rgb_theme();
        theme
            .update(&inputs(&["white", "black"]), InterpolationMode::Hsi, fast())
            .unwrap();
        assert_eq2!(theme.mode(), InterpolationMode::Hsi);
        assert_eq2!(theme.active_palette_hexes(), ["#ffffff", "#000000"]);
        assert_eq2!(theme.active_palette().n_steps(), 32);
        assert!(matches!(
            theme.update(&inputs(&["not-a-color"]), InterpolationMode::Rgb, fast()),
            Err(PaletteError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_set_colors_clamps_to_max() {
        let mut theme = theme_with(&["red"], 16, 2);
        theme
            .set_colors(&inputs(&["white", "black", "blue"]), fast())
            .unwrap();
        assert_eq2!(theme.active_palette_hexes(), ["#ffffff", "#000000"]);
    }

    #[test]
    fn test_random_from_seed() {
        let mut theme = rgb_theme();
        theme
            .random_from("#800080", RandomThemeConfig::default())
            .unwrap();
        assert_eq2!(theme.active_palette_hexes()[0], "#800080");
        assert_eq2!(theme.active_palette().n_colors(), 3);
        assert!(matches!(
            theme.random_from("not-a-color", RandomThemeConfig::default()),
            Err(PaletteError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_push_and_rotate_colors() {
        let mut theme = rgb_theme();
        theme.push_new_color("#800080", fast()).unwrap();
        assert_eq2!(
            theme.active_palette_hexes(),
            ["#ff0000", "#008000", "#0000ff", "#800080"]
        );
        theme.rotate_color("white", fast()).unwrap();
        assert_eq2!(
            theme.active_palette_hexes(),
            ["#008000", "#0000ff", "#800080", "#ffffff"]
        );
        theme.rotate_random_color(RandomThemeColorConfig::default());
        assert_eq2!(theme.active_palette().n_colors(), 4);
        assert_eq2!(theme.active_palette_hexes()[0], "#0000ff");
        assert!(matches!(
            theme.push_new_color("not-a-color", fast()),
            Err(PaletteError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_normalize_index_wraps() {
        let mut theme = theme_with(&["red", "blue"], 16, 8);
        for offset in [0, 5, -37, 1_000] {
            theme.tick(offset);
            for index in -100..100 {
                assert!(theme.normalize_index(index) < 16);
            }
        }
    }

    #[test]
    fn test_normalize_index_rounds_and_rotates() {
        let mut theme = theme_with(&["red", "blue"], 16, 8);
        assert_eq2!(theme.normalize_index(0.4), 0);
        assert_eq2!(theme.normalize_index(0.5), 1);
        assert_eq2!(theme.normalize_index(-1), 15);
        assert_eq2!(theme.normalize_index(16), 0);

        theme.tick(3);
        assert_eq2!(theme.normalize_index(0), 3);
        theme.tick(-5);
        assert_eq2!(theme.normalize_index(0), 14);
    }

    #[test]
    fn test_normalize_index_accepts_any_integer_or_float() {
        let mut theme = theme_with(&["red", "blue"], 16, 8);
        let frame: i64 = 16 * 1_000_000_007 + 5;
        assert_eq2!(theme.normalize_index(frame), 5);
        assert_eq2!(theme.normalize_index(-frame), 11);
        assert_eq2!(theme.normalize_index(21_usize), 5);
        assert_eq2!(theme.normalize_index(21_u64), 5);
        assert_eq2!(theme.normalize_index(-11_isize), 5);
        assert_eq2!(theme.normalize_index(5_u8), 5);
        assert_eq2!(theme.normalize_index(4.5_f32), 5);
        assert_eq2!(theme.normalize_index(-1.5_f64), 15);

        theme.tick(frame);
        assert_eq2!(theme.normalize_index(0), 5);
        assert_eq2!(theme.get_color(frame, None), theme.get_color(5, None));
    }

    #[test]
    fn test_get_color_follows_rotation() {
        let mut theme = theme_with(&["red", "blue"], 16, 8);
        assert_eq2!(theme.get_color(0, None).hex(), "#ff0000");
        assert_eq2!(theme.get_color(8, None).hex(), "#0000ff");
        theme.tick(8);
        assert_eq2!(theme.get_color(0, None).hex(), "#0000ff");
    }

    #[test]
    fn test_get_color_brightness() {
        let mut theme = theme_with(&["red", "blue"], 16, 8);
        let full = theme.get_color(0, None);
        assert_eq2!(theme.get_color(0, Some(1.0)), full);
        assert_eq2!(theme.get_color(0, Some(7.0)), full);

        let dimmed = theme.get_color(0, Some(0.5));
        assert!(dimmed.hsv_value() < full.hsv_value());

        theme.set_brightness(0.5);
        assert_eq2!(theme.get_color(0, None), dimmed);
        // Theme and per call brightness compound.
        assert!(theme.get_color(0, Some(0.5)).hsv_value() < dimmed.hsv_value());
    }

    #[test_case(2.0, 1.0)]
    #[test_case(-1.0, 0.0)]
    #[test_case(0.25, 0.25)]
    fn test_set_brightness_clamps(input: f32, expected: f32) {
        let mut theme = rgb_theme();
        theme.set_brightness(input);
        assert_eq2!(theme.brightness(), expected);
    }
}

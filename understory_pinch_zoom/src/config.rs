// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::animation::Easing;

/// Tuning knobs for a [`crate::GestureCoordinator`].
///
/// All times are in the caller's tick unit (milliseconds by convention) and
/// all velocities are in viewport pixels per tick unit.
///
/// ```rust
/// use understory_pinch_zoom::{Easing, ZoomConfig};
///
/// let config = ZoomConfig::default()
///     .with_max_scale_multiplier(4.0)
///     .with_zoom_easing(Easing::EaseInOut);
/// assert_eq!(config.max_scale_multiplier, 4.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomConfig {
    /// Maximum scale expressed as a multiple of the fitted (minimum) scale.
    pub max_scale_multiplier: f64,
    /// Duration of the double-tap zoom animation.
    pub zoom_duration: f64,
    /// Progress curve of the double-tap zoom animation.
    pub zoom_easing: Easing,
    /// Velocity multiplier applied once per fling tick; must lie in `(0, 1)`.
    pub fling_friction: f64,
    /// Fling speed below which an axis is considered at rest.
    pub fling_velocity_epsilon: f64,
    /// Tolerance used when deciding whether the view sits at the fitted scale.
    pub scale_epsilon: f64,
}

impl ZoomConfig {
    /// Default maximum scale multiplier.
    pub const DEFAULT_MAX_SCALE_MULTIPLIER: f64 = 2.5;
    /// Default double-tap animation duration.
    pub const DEFAULT_ZOOM_DURATION: f64 = 300.0;
    /// Default per-tick fling friction.
    pub const DEFAULT_FLING_FRICTION: f64 = 0.95;
    /// Default fling rest threshold.
    pub const DEFAULT_FLING_VELOCITY_EPSILON: f64 = 0.01;
    /// Default fitted-scale tolerance.
    pub const DEFAULT_SCALE_EPSILON: f64 = 1e-6;

    /// Sets [`ZoomConfig::max_scale_multiplier`].
    #[must_use]
    pub fn with_max_scale_multiplier(mut self, multiplier: f64) -> Self {
        self.max_scale_multiplier = multiplier;
        self
    }

    /// Sets [`ZoomConfig::zoom_duration`].
    #[must_use]
    pub fn with_zoom_duration(mut self, duration: f64) -> Self {
        self.zoom_duration = duration;
        self
    }

    /// Sets [`ZoomConfig::zoom_easing`].
    #[must_use]
    pub fn with_zoom_easing(mut self, easing: Easing) -> Self {
        self.zoom_easing = easing;
        self
    }

    /// Sets [`ZoomConfig::fling_friction`].
    #[must_use]
    pub fn with_fling_friction(mut self, friction: f64) -> Self {
        self.fling_friction = friction;
        self
    }

    /// Sets [`ZoomConfig::fling_velocity_epsilon`].
    #[must_use]
    pub fn with_fling_velocity_epsilon(mut self, epsilon: f64) -> Self {
        self.fling_velocity_epsilon = epsilon;
        self
    }

    /// Sets [`ZoomConfig::scale_epsilon`].
    #[must_use]
    pub fn with_scale_epsilon(mut self, epsilon: f64) -> Self {
        self.scale_epsilon = epsilon;
        self
    }

    /// Returns a copy with degenerate values corrected.
    ///
    /// - A multiplier below `1` is raised to `1` so `max_scale >= min_scale`;
    ///   a non-finite multiplier falls back to the default.
    /// - Friction outside `(0, 1)` falls back to the default.
    /// - A negative or non-finite duration falls back to the default.
    /// - A non-positive or non-finite epsilon falls back to its default.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let max_scale_multiplier = if self.max_scale_multiplier.is_finite() {
            self.max_scale_multiplier.max(1.0)
        } else {
            Self::DEFAULT_MAX_SCALE_MULTIPLIER
        };
        let zoom_duration = if self.zoom_duration.is_finite() && self.zoom_duration >= 0.0 {
            self.zoom_duration
        } else {
            Self::DEFAULT_ZOOM_DURATION
        };
        let fling_friction = if self.fling_friction > 0.0 && self.fling_friction < 1.0 {
            self.fling_friction
        } else {
            Self::DEFAULT_FLING_FRICTION
        };
        let positive = |v: f64, fallback: f64| {
            if v.is_finite() && v > 0.0 { v } else { fallback }
        };
        let sanitized = Self {
            max_scale_multiplier,
            zoom_duration,
            zoom_easing: self.zoom_easing,
            fling_friction,
            fling_velocity_epsilon: positive(
                self.fling_velocity_epsilon,
                Self::DEFAULT_FLING_VELOCITY_EPSILON,
            ),
            scale_epsilon: positive(self.scale_epsilon, Self::DEFAULT_SCALE_EPSILON),
        };
        if sanitized != self {
            log::debug!("corrected degenerate zoom config {self:?} to {sanitized:?}");
        }
        sanitized
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            max_scale_multiplier: Self::DEFAULT_MAX_SCALE_MULTIPLIER,
            zoom_duration: Self::DEFAULT_ZOOM_DURATION,
            zoom_easing: Easing::Linear,
            fling_friction: Self::DEFAULT_FLING_FRICTION,
            fling_velocity_epsilon: Self::DEFAULT_FLING_VELOCITY_EPSILON,
            scale_epsilon: Self::DEFAULT_SCALE_EPSILON,
        }
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timed interpolation between two view transforms.

use kurbo::Vec2;

use crate::viewport::ViewTransform;

/// Progress curve applied to the normalized animation time.
///
/// Every curve is monotonic with `f(0) = 0` and `f(1) = 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Smoothstep: slow start and slow finish.
    EaseInOut,
    /// Cubic ease-out: fast start, slow finish.
    EaseOut,
}

impl Easing {
    /// Maps a progress value to eased progress; `t` is clamped to `[0, 1]` first.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.max(0.0).min(1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
        }
    }
}

/// Interpolates scale and translation from one transform to another over a
/// fixed duration.
///
/// The animator only tracks time and produces raw interpolated values;
/// clamping against the viewport bounds is the caller's job.
#[derive(Clone, Debug)]
pub struct ZoomAnimator {
    from: ViewTransform,
    to: ViewTransform,
    elapsed: f64,
    duration: f64,
    easing: Easing,
}

impl ZoomAnimator {
    /// Creates an animator from `from` to `to` over `duration`.
    ///
    /// A non-positive duration completes on the first [`ZoomAnimator::advance`].
    #[must_use]
    pub fn new(from: ViewTransform, to: ViewTransform, duration: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(0.0),
            easing,
        }
    }

    /// Returns the starting transform.
    #[must_use]
    pub fn start(&self) -> ViewTransform {
        self.from
    }

    /// Returns the target transform.
    #[must_use]
    pub fn target(&self) -> ViewTransform {
        self.to
    }

    /// Returns the elapsed time.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Returns the total duration.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Returns normalized progress in `[0, 1]`, before easing.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).max(0.0).min(1.0)
    }

    /// Returns `true` once the full duration has elapsed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advances time by `dt` and returns the transform for the new time.
    ///
    /// Once finished the exact target is returned, free of interpolation drift.
    pub fn advance(&mut self, dt: f64) -> ViewTransform {
        self.elapsed += dt;
        self.sample()
    }

    /// Returns the transform for the current time without advancing.
    #[must_use]
    pub fn sample(&self) -> ViewTransform {
        if self.is_finished() {
            return self.to;
        }
        let f = self.easing.apply(self.progress());
        ViewTransform {
            scale: lerp(self.from.scale, self.to.scale, f),
            translate: Vec2::new(
                lerp(self.from.translate.x, self.to.translate.x, f),
                lerp(self.from.translate.y, self.to.translate.y, f),
            ),
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
